use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::deployer::{DeployOptions, ExecutorConfig};
use crate::scheduler::DEFAULT_JOBS;
use crate::selection::SelectionSpec;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub deploy: DeployConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub executor: ExecutorConfig,
    #[serde(default)]
    pub locales: LocaleConfig,
    #[serde(default)]
    pub selection: SelectionSpec,
    #[serde(default)]
    pub options: DeployOptions,
}

/// Application state configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub mode: AppMode,
}

/// Operating mode of the application serving the assets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppMode {
    #[default]
    Default,
    Developer,
    Production,
}

impl std::fmt::Display for AppMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Developer => write!(f, "developer"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Deployment run configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeployConfig {
    /// Units deployed concurrently. Validated before scheduling.
    #[serde(default = "default_jobs")]
    pub jobs: i64,
    /// Report units without deploying them.
    #[serde(default)]
    pub dry_run: bool,
    /// Deploy outside production mode.
    #[serde(default)]
    pub force: bool,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            jobs: default_jobs(),
            dry_run: false,
            force: false,
        }
    }
}

fn default_jobs() -> i64 {
    DEFAULT_JOBS
}

/// Catalog source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("catalog.json")
}

/// Locale validation configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LocaleConfig {
    /// Accepted locale codes. Empty accepts any well-formed code.
    #[serde(default)]
    pub known: Vec<String>,
}
