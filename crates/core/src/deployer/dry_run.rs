//! Deployer that only reports what it would deploy.

use async_trait::async_trait;
use tracing::info;

use super::error::DeployerError;
use super::traits::Deployer;
use super::types::DeployRequest;

/// Logs every unit and reports success without deploying anything.
#[derive(Debug, Clone, Default)]
pub struct DryRunDeployer;

impl DryRunDeployer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Deployer for DryRunDeployer {
    fn name(&self) -> &str {
        "dry-run"
    }

    async fn deploy(&self, request: DeployRequest) -> Result<(), DeployerError> {
        for unit in request.units() {
            info!("Dry run: would deploy {}", unit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deployer::DeployOptions;
    use crate::work::WorkUnit;

    #[test]
    fn test_dry_run_always_succeeds() {
        let deployer = DryRunDeployer::new();
        let request = DeployRequest::for_unit(
            &WorkUnit::new("frontend", "Magento/luma", "en_US"),
            &DeployOptions::default(),
        );

        assert!(tokio_test::block_on(deployer.deploy(request)).is_ok());
        assert_eq!(deployer.name(), "dry-run");
        assert!(deployer.supports_concurrency());
    }
}
