//! Deployer module: the seam to whatever actually renders and publishes
//! static assets for a unit.
//!
//! The core never looks inside a deployment. It hands a [`DeployRequest`]
//! to a [`Deployer`] and only cares whether it succeeded.
//!
//! # Example
//!
//! ```ignore
//! use static_deploy_core::deployer::{CommandDeployer, Deployer, DeployRequest, ExecutorConfig};
//!
//! let config = ExecutorConfig::default().with_command(["bin/deploy-unit"]);
//! let deployer = CommandDeployer::new(&config)?;
//!
//! let unit = WorkUnit::new("frontend", "Magento/luma", "en_US");
//! deployer.deploy(DeployRequest::for_unit(&unit, &DeployOptions::default())).await?;
//! ```

mod command;
mod config;
mod dry_run;
mod error;
mod traits;
mod types;

pub use command::CommandDeployer;
pub use config::ExecutorConfig;
pub use dry_run::DryRunDeployer;
pub use error::DeployerError;
pub use traits::Deployer;
pub use types::{DeployOptions, DeployRequest, STATUS_FAILURE, STATUS_SUCCESS};

use std::sync::Arc;
use tracing::info;

/// Create the deployer for a run.
///
/// Dry runs never touch the executor; otherwise the executor command must
/// be configured.
pub fn create_deployer(
    executor: &ExecutorConfig,
    dry_run: bool,
) -> Result<Arc<dyn Deployer>, DeployerError> {
    if dry_run {
        info!("Dry run: no files will be deployed");
        return Ok(Arc::new(DryRunDeployer::new()));
    }

    let deployer = CommandDeployer::new(executor)?;
    info!("Deploying with command {:?}", deployer.program());
    Ok(Arc::new(deployer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dry_run_deployer_without_command() {
        let deployer = create_deployer(&ExecutorConfig::default(), true).unwrap();
        assert_eq!(deployer.name(), "dry-run");
    }

    #[test]
    fn test_create_command_deployer() {
        let config = ExecutorConfig::default().with_command(["bin/deploy-unit"]);
        let deployer = create_deployer(&config, false).unwrap();
        assert_eq!(deployer.name(), "command");
    }

    #[test]
    fn test_create_deployer_requires_command() {
        let result = create_deployer(&ExecutorConfig::default(), false);
        assert!(matches!(result, Err(DeployerError::InvalidCommand { .. })));
    }
}
