//! Trait definitions for the deployer module.

use async_trait::async_trait;

use super::error::DeployerError;
use super::types::DeployRequest;

/// Performs the actual deployment of static assets.
///
/// Implementations must be safe to call concurrently when
/// [`supports_concurrency`](Deployer::supports_concurrency) returns true.
#[async_trait]
pub trait Deployer: Send + Sync {
    /// Returns the name of this deployer implementation.
    fn name(&self) -> &str;

    /// Deploys every unit covered by `request`.
    async fn deploy(&self, request: DeployRequest) -> Result<(), DeployerError>;

    /// Whether units may be deployed concurrently. When false the
    /// scheduler runs sequentially regardless of the configured job count.
    fn supports_concurrency(&self) -> bool {
        true
    }
}
