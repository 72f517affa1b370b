//! Mock deployer for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::deployer::{DeployRequest, Deployer, DeployerError};
use crate::work::WorkUnit;

/// Mock implementation of the Deployer trait.
///
/// Provides controllable behavior for testing:
/// - Records every deployed unit in call order
/// - Fails selected units with a chosen status
/// - Simulates slow deployments
/// - Tracks how many deployments ran at the same time
///
/// # Example
///
/// ```rust,ignore
/// use static_deploy_core::testing::MockDeployer;
///
/// let deployer = MockDeployer::new().with_delay(Duration::from_millis(10));
/// deployer.fail_unit(WorkUnit::new("frontend", "Magento/luma", "en_US"), 1).await;
///
/// let pool = WorkerPool::new(Arc::new(deployer.clone()), Concurrency::new(2)?);
/// pool.run(units).await;
///
/// assert!(deployer.peak_concurrency() <= 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockDeployer {
    /// Units deployed, in the order deploy was called.
    deployed: Arc<RwLock<Vec<WorkUnit>>>,
    /// Units that fail, with the exit status they report.
    failures: Arc<RwLock<HashMap<WorkUnit, i32>>>,
    /// Units whose deployment panics.
    panics: Arc<RwLock<HashSet<WorkUnit>>>,
    /// Simulated deployment duration.
    delay: Duration,
    /// Whether the scheduler may run units concurrently.
    concurrent: bool,
    /// Deployments currently running.
    in_flight: Arc<AtomicUsize>,
    /// Highest value `in_flight` reached.
    peak: Arc<AtomicUsize>,
}

impl Default for MockDeployer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDeployer {
    /// Create a new mock deployer that succeeds immediately.
    pub fn new() -> Self {
        Self {
            deployed: Arc::new(RwLock::new(Vec::new())),
            failures: Arc::new(RwLock::new(HashMap::new())),
            panics: Arc::new(RwLock::new(HashSet::new())),
            delay: Duration::ZERO,
            concurrent: true,
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Set the simulated deployment duration.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set whether this deployer allows concurrent units.
    pub fn with_concurrency_support(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    /// Make `unit` fail with `status`.
    pub async fn fail_unit(&self, unit: WorkUnit, status: i32) {
        self.failures.write().await.insert(unit, status);
    }

    /// Make the deployment of `unit` panic.
    pub async fn panic_on_unit(&self, unit: WorkUnit) {
        self.panics.write().await.insert(unit);
    }

    /// Get all deployed units in call order.
    pub async fn deployed_units(&self) -> Vec<WorkUnit> {
        self.deployed.read().await.clone()
    }

    /// Get the number of units deployed.
    pub async fn deploy_count(&self) -> usize {
        self.deployed.read().await.len()
    }

    /// Highest number of deployments observed running at once.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    async fn deploy_unit(&self, unit: WorkUnit) -> Result<(), DeployerError> {
        self.deployed.write().await.push(unit.clone());

        if self.panics.read().await.contains(&unit) {
            panic!("mock deployer panic for {}", unit);
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match self.failures.read().await.get(&unit) {
            Some(&code) => Err(DeployerError::NonZeroExit { code }),
            None => Ok(()),
        }
    }
}

/// Decrements the in-flight counter even when a deployment panics.
struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Deployer for MockDeployer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn deploy(&self, request: DeployRequest) -> Result<(), DeployerError> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlightGuard(&self.in_flight);
        self.peak.fetch_max(running, Ordering::SeqCst);

        let mut result = Ok(());
        for unit in request.units() {
            if let Err(e) = self.deploy_unit(unit).await {
                result = Err(e);
            }
        }
        result
    }

    fn supports_concurrency(&self) -> bool {
        self.concurrent
    }
}
