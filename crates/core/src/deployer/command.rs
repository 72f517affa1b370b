//! Deployer that runs an external command per unit.
//!
//! Each unit runs in its own OS process:
//!
//! ```text
//! <program> [args...] --area <area> --theme <theme> --locale <locale> [--no-css ...]
//! ```
//!
//! The unit is also exported as `STATIC_DEPLOY_AREA`, `STATIC_DEPLOY_THEME`
//! and `STATIC_DEPLOY_LOCALE`. The child's exit code is the unit status.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::work::WorkUnit;

use super::config::ExecutorConfig;
use super::error::DeployerError;
use super::traits::Deployer;
use super::types::{DeployOptions, DeployRequest};

/// Runs the configured program once per work unit.
#[derive(Debug, Clone)]
pub struct CommandDeployer {
    program: PathBuf,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl CommandDeployer {
    /// Creates a deployer from executor configuration.
    pub fn new(config: &ExecutorConfig) -> Result<Self, DeployerError> {
        let (program, args) =
            config
                .command
                .split_first()
                .ok_or_else(|| DeployerError::InvalidCommand {
                    reason: "executor command is empty".to_string(),
                })?;

        if program.trim().is_empty() {
            return Err(DeployerError::InvalidCommand {
                reason: "executor program is blank".to_string(),
            });
        }

        Ok(Self {
            program: PathBuf::from(program),
            args: args.to_vec(),
            working_dir: config.working_dir.clone(),
        })
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    fn build_command(&self, unit: &WorkUnit, options: &DeployOptions) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg("--area")
            .arg(&unit.area)
            .arg("--theme")
            .arg(&unit.theme)
            .arg("--locale")
            .arg(&unit.locale)
            .args(options.to_args())
            .env("STATIC_DEPLOY_AREA", &unit.area)
            .env("STATIC_DEPLOY_THEME", &unit.theme)
            .env("STATIC_DEPLOY_LOCALE", &unit.locale);

        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        cmd
    }

    async fn run_unit(
        &self,
        unit: &WorkUnit,
        options: &DeployOptions,
    ) -> Result<(), DeployerError> {
        debug!("Running {:?} for {}", self.program, unit);

        let status = self
            .build_command(unit, options)
            .status()
            .await
            .map_err(|source| DeployerError::SpawnFailed {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            return Ok(());
        }

        match status.code() {
            Some(code) => Err(DeployerError::NonZeroExit { code }),
            None => Err(DeployerError::Terminated),
        }
    }
}

#[async_trait]
impl Deployer for CommandDeployer {
    fn name(&self) -> &str {
        "command"
    }

    async fn deploy(&self, request: DeployRequest) -> Result<(), DeployerError> {
        let mut last_error = None;

        for unit in request.units() {
            if let Err(e) = self.run_unit(&unit, &request.options).await {
                warn!("Deploying {} failed: {}", unit, e);
                last_error = Some(e);
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
