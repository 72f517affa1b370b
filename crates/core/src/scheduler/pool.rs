//! Bounded worker pool.

use chrono::Utc;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::deployer::{DeployOptions, DeployRequest, Deployer, STATUS_FAILURE, STATUS_SUCCESS};
use crate::metrics;
use crate::work::WorkUnit;

use super::config::Concurrency;
use super::types::{AggregateStatus, ExecutionMode, RunSummary, SchedulerEvent};

/// Running totals for one scheduler run.
#[derive(Debug, Default)]
struct Tally {
    status: AggregateStatus,
    executed: usize,
    failed: usize,
    peak_active: usize,
}

impl Tally {
    fn record(&mut self, status: i32) {
        self.status |= status;
        self.executed += 1;
        if status != STATUS_SUCCESS {
            self.failed += 1;
        }
    }
}

/// Runs work units with at most `concurrency` of them in flight.
///
/// Every unit is executed exactly once. A failing unit is recorded in the
/// aggregate status and never stops the remaining ones.
pub struct WorkerPool {
    deployer: Arc<dyn Deployer>,
    concurrency: Concurrency,
    options: DeployOptions,
    progress_tx: Option<mpsc::Sender<SchedulerEvent>>,
}

impl WorkerPool {
    pub fn new(deployer: Arc<dyn Deployer>, concurrency: Concurrency) -> Self {
        Self {
            deployer,
            concurrency,
            options: DeployOptions::default(),
            progress_tx: None,
        }
    }

    /// Sets the options forwarded with every request.
    pub fn with_options(mut self, options: DeployOptions) -> Self {
        self.options = options;
        self
    }

    /// Publishes start/finish events on `tx`.
    ///
    /// Sends wait for channel capacity, so the receiver must be drained
    /// while the pool runs.
    pub fn with_progress(mut self, tx: mpsc::Sender<SchedulerEvent>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn mode(&self) -> ExecutionMode {
        if self.concurrency.get() <= 1 || !self.deployer.supports_concurrency() {
            ExecutionMode::Sequential
        } else {
            ExecutionMode::Parallel
        }
    }

    /// Runs every unit to completion.
    pub async fn run(&self, units: Vec<WorkUnit>) -> RunSummary {
        let started_at = Utc::now();
        let mode = self.mode();
        let units_total = units.len();

        info!(
            "Deploying {} units with {} ({:?}, jobs: {})",
            units_total,
            self.deployer.name(),
            mode,
            self.concurrency.get()
        );

        let tally = match mode {
            ExecutionMode::Sequential => self.run_sequential(units).await,
            ExecutionMode::Parallel => self.run_parallel(units).await,
        };

        let summary = RunSummary {
            mode,
            status: tally.status,
            units_total,
            units_failed: tally.failed,
            peak_active: tally.peak_active,
            started_at,
            finished_at: Utc::now(),
        };

        if tally.executed != units_total {
            error!(
                "Executed {} of {} units; some workers were lost",
                tally.executed, units_total
            );
        }

        info!(
            "Deployment finished in {} ms: {} units, {} failed, peak {} active",
            summary.duration_ms(),
            summary.units_total,
            summary.units_failed,
            summary.peak_active
        );

        summary
    }

    async fn run_sequential(&self, units: Vec<WorkUnit>) -> Tally {
        let mut tally = Tally::default();

        for unit in units {
            tally.peak_active = 1;
            self.emit(SchedulerEvent::UnitStarted {
                unit: unit.clone(),
                active: 1,
            })
            .await;

            let status =
                execute_unit(Arc::clone(&self.deployer), unit.clone(), self.options.clone()).await;
            tally.record(status);

            self.emit(SchedulerEvent::UnitFinished {
                unit,
                status,
                active: 0,
            })
            .await;
        }

        tally
    }

    async fn run_parallel(&self, units: Vec<WorkUnit>) -> Tally {
        let limit = self.concurrency.get();
        let mut pending: VecDeque<WorkUnit> = units.into();
        let mut active: JoinSet<(WorkUnit, i32)> = JoinSet::new();
        let mut tally = Tally::default();

        while active.len() < limit {
            match pending.pop_front() {
                Some(unit) => self.launch(&mut active, unit, &mut tally).await,
                None => break,
            }
        }

        // A slot is only refilled after its worker has been reaped, so the
        // active set never exceeds the limit.
        while let Some(joined) = active.join_next().await {
            match joined {
                Ok((unit, status)) => {
                    debug!("Reaped worker for {} (status {})", unit, status);
                    tally.record(status);
                    self.emit(SchedulerEvent::UnitFinished {
                        unit,
                        status,
                        active: active.len(),
                    })
                    .await;
                }
                Err(e) => {
                    error!("Worker task failed: {}", e);
                    tally.record(STATUS_FAILURE);
                }
            }

            if let Some(unit) = pending.pop_front() {
                self.launch(&mut active, unit, &mut tally).await;
            }
        }

        tally
    }

    async fn launch(
        &self,
        active: &mut JoinSet<(WorkUnit, i32)>,
        unit: WorkUnit,
        tally: &mut Tally,
    ) {
        let deployer = Arc::clone(&self.deployer);
        let options = self.options.clone();
        let worker_unit = unit.clone();

        active.spawn(async move {
            let status = execute_unit(deployer, worker_unit.clone(), options).await;
            (worker_unit, status)
        });

        let running = active.len();
        tally.peak_active = tally.peak_active.max(running);
        debug!("Launched worker for {} ({} active)", unit, running);

        self.emit(SchedulerEvent::UnitStarted {
            unit,
            active: running,
        })
        .await;
    }

    async fn emit(&self, event: SchedulerEvent) {
        if let Some(ref tx) = self.progress_tx {
            let _ = tx.send(event).await;
        }
    }
}

/// Deploys one unit and maps the outcome to a status code.
///
/// The deployer call runs in its own task so a panic is contained and
/// reported as a failure.
async fn execute_unit(deployer: Arc<dyn Deployer>, unit: WorkUnit, options: DeployOptions) -> i32 {
    let start = Instant::now();
    metrics::UNITS_LAUNCHED.inc();
    metrics::ACTIVE_WORKERS.inc();

    let request = DeployRequest::for_unit(&unit, &options);
    let outcome = tokio::spawn(async move { deployer.deploy(request).await }).await;

    let status = match outcome {
        Ok(Ok(())) => STATUS_SUCCESS,
        Ok(Err(e)) => {
            warn!("Deployment of {} failed: {}", unit, e);
            e.status()
        }
        Err(e) => {
            error!("Deployment of {} panicked: {}", unit, e);
            STATUS_FAILURE
        }
    };

    let result = metrics::result_label(status);
    metrics::ACTIVE_WORKERS.dec();
    metrics::UNITS_COMPLETED.with_label_values(&[result]).inc();
    metrics::UNIT_DURATION
        .with_label_values(&[result])
        .observe(start.elapsed().as_secs_f64());

    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deployer::DryRunDeployer;
    use crate::testing::MockDeployer;

    fn units(count: usize) -> Vec<WorkUnit> {
        (0..count)
            .map(|i| WorkUnit::new("frontend", "Magento/luma", format!("l{}_XX", i)))
            .collect()
    }

    #[test]
    fn test_mode_selection() {
        let deployer: Arc<dyn Deployer> = Arc::new(DryRunDeployer::new());

        let pool = WorkerPool::new(Arc::clone(&deployer), Concurrency::new(1).unwrap());
        assert_eq!(pool.mode(), ExecutionMode::Sequential);

        let pool = WorkerPool::new(deployer, Concurrency::new(4).unwrap());
        assert_eq!(pool.mode(), ExecutionMode::Parallel);
    }

    #[test]
    fn test_deployer_without_concurrency_forces_sequential() {
        let mock = MockDeployer::new().with_concurrency_support(false);
        let pool = WorkerPool::new(Arc::new(mock), Concurrency::new(8).unwrap());
        assert_eq!(pool.mode(), ExecutionMode::Sequential);
    }

    #[tokio::test]
    async fn test_empty_queue_completes() {
        let mock = MockDeployer::new();
        let pool = WorkerPool::new(Arc::new(mock.clone()), Concurrency::new(3).unwrap());

        let summary = pool.run(Vec::new()).await;
        assert!(summary.is_success());
        assert_eq!(summary.units_total, 0);
        assert_eq!(summary.peak_active, 0);
        assert_eq!(mock.deploy_count().await, 0);
    }

    #[tokio::test]
    async fn test_sequential_runs_in_order_and_continues_after_failure() {
        let mock = MockDeployer::new();
        let all = units(3);
        mock.fail_unit(all[0].clone(), 2).await;

        let pool = WorkerPool::new(Arc::new(mock.clone()), Concurrency::new(1).unwrap());
        let summary = pool.run(all.clone()).await;

        assert_eq!(summary.mode, ExecutionMode::Sequential);
        assert_eq!(summary.status.value(), 2);
        assert_eq!(summary.units_failed, 1);
        assert_eq!(summary.peak_active, 1);
        assert_eq!(mock.deployed_units().await, all);
    }

    #[tokio::test]
    async fn test_parallel_respects_limit() {
        let mock = MockDeployer::new().with_delay(std::time::Duration::from_millis(20));
        let pool = WorkerPool::new(Arc::new(mock.clone()), Concurrency::new(2).unwrap());

        let summary = pool.run(units(5)).await;

        assert!(summary.is_success());
        assert_eq!(summary.mode, ExecutionMode::Parallel);
        assert_eq!(summary.peak_active, 2);
        assert!(mock.peak_concurrency() <= 2);
        assert_eq!(mock.deploy_count().await, 5);
    }

    #[tokio::test]
    async fn test_panicking_deployer_counts_as_failure() {
        let mock = MockDeployer::new();
        let all = units(3);
        mock.panic_on_unit(all[1].clone()).await;

        let pool = WorkerPool::new(Arc::new(mock.clone()), Concurrency::new(2).unwrap());
        let summary = pool.run(all).await;

        assert!(!summary.is_success());
        assert_eq!(summary.units_failed, 1);
        assert_eq!(summary.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_progress_events_track_active_count() {
        let mock = MockDeployer::new().with_delay(std::time::Duration::from_millis(5));
        let (tx, mut rx) = mpsc::channel(64);
        let pool = WorkerPool::new(Arc::new(mock), Concurrency::new(3).unwrap()).with_progress(tx);

        pool.run(units(7)).await;
        drop(pool);

        let mut started = 0;
        let mut finished = 0;
        while let Some(event) = rx.recv().await {
            match event {
                SchedulerEvent::UnitStarted { active, .. } => {
                    started += 1;
                    assert!(active <= 3);
                }
                SchedulerEvent::UnitFinished { status, .. } => {
                    finished += 1;
                    assert_eq!(status, STATUS_SUCCESS);
                }
            }
        }
        assert_eq!(started, 7);
        assert_eq!(finished, 7);
    }
}
