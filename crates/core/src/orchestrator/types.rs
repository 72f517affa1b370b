//! Types for the deployment orchestrator.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::{AppMode, Config};
use crate::deployer::{DeployOptions, DeployerError};
use crate::scheduler::{RunSummary, SchedulerError, DEFAULT_JOBS};
use crate::selection::{DeployPlan, SelectionError, SelectionSpec};

/// Errors that abort an invocation before any unit is deployed.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Invoked outside production mode without `--force`.
    #[error(
        "Deploy static content is applicable only for production mode (current mode: {mode}).\n\
         Switch the application to production mode or pass --force to deploy anyway."
    )]
    Precondition { mode: AppMode },

    /// Catalog discovery error.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Invalid include/exclude selection.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Invalid scheduler settings.
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    /// Deployer could not be created.
    #[error("deployer error: {0}")]
    Deployer(#[from] DeployerError),
}

/// Everything one invocation needs, captured up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployInvocation {
    /// Current application mode.
    pub mode: AppMode,
    /// Deploy even when not in production mode.
    pub force: bool,
    /// Include/exclude lists per entity kind.
    pub selection: SelectionSpec,
    /// Requested job count, validated before discovery.
    pub jobs: i64,
    /// Switches forwarded to the deployer.
    pub options: DeployOptions,
}

impl Default for DeployInvocation {
    fn default() -> Self {
        Self {
            mode: AppMode::default(),
            force: false,
            selection: SelectionSpec::default(),
            jobs: DEFAULT_JOBS,
            options: DeployOptions::default(),
        }
    }
}

impl DeployInvocation {
    /// Builds an invocation from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            mode: config.app.mode,
            force: config.deploy.force,
            selection: config.selection.clone(),
            jobs: config.deploy.jobs,
            options: config.options.clone(),
        }
    }

    /// Fails unless the application is in production mode or `force` is set.
    pub fn check_precondition(&self) -> Result<(), OrchestratorError> {
        if !self.force && self.mode != AppMode::Production {
            return Err(OrchestratorError::Precondition { mode: self.mode });
        }
        Ok(())
    }
}

/// The resolved sets shown to the operator before deployment starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentReport {
    pub locales: Vec<String>,
    pub areas: Vec<String>,
    pub themes: Vec<String>,
}

impl DeploymentReport {
    pub fn from_plan(plan: &DeployPlan) -> Self {
        Self {
            locales: plan.locales.clone(),
            areas: plan.areas().into_iter().map(String::from).collect(),
            themes: plan.requested_themes.clone(),
        }
    }

    /// The three report lines, in output order.
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Requested languages: {}", self.locales.join(", ")),
            format!("Requested areas: {}", self.areas.join(", ")),
            format!("Requested themes: {}", self.themes.join(", ")),
        ]
    }
}

impl fmt::Display for DeploymentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [locales, areas, themes] = self.lines();
        write!(f, "{}\n{}\n{}", locales, areas, themes)
    }
}

/// Result of a completed invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentOutcome {
    pub report: DeploymentReport,
    pub summary: RunSummary,
}

impl DeploymentOutcome {
    pub fn exit_code(&self) -> i32 {
        self.summary.exit_code()
    }
}
