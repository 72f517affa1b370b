//! Deployment orchestrator implementation.
//!
//! One invocation runs, in order:
//! - Precondition: production mode or `force`
//! - Concurrency check
//! - Discovery: read the catalog and build the universe
//! - Resolution: validate selections and build the deploy plan
//! - Report: publish the requested locales, areas and themes
//! - Scheduling: enumerate work units and drain them through the pool

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::catalog::{CatalogSource, EntityUniverse};
use crate::deployer::Deployer;
use crate::metrics;
use crate::scheduler::{Concurrency, SchedulerEvent, WorkerPool};
use crate::selection::{DeployPlan, EntityFilter, LocaleValidator};

use super::types::{DeployInvocation, DeploymentOutcome, DeploymentReport, OrchestratorError};

/// Callback invoked with the report before any unit runs.
pub type ReportCallback = Arc<dyn Fn(&DeploymentReport) + Send + Sync>;

/// Drives one static content deployment from catalog to exit status.
pub struct DeployOrchestrator {
    deployer: Arc<dyn Deployer>,
    locale_validator: Arc<dyn LocaleValidator>,
    report_callback: Option<ReportCallback>,
    progress_tx: Option<mpsc::Sender<SchedulerEvent>>,
}

impl DeployOrchestrator {
    pub fn new(deployer: Arc<dyn Deployer>, locale_validator: Arc<dyn LocaleValidator>) -> Self {
        Self {
            deployer,
            locale_validator,
            report_callback: None,
            progress_tx: None,
        }
    }

    /// Set a callback that receives the report before deployment starts.
    pub fn with_report_callback(mut self, callback: ReportCallback) -> Self {
        self.report_callback = Some(callback);
        self
    }

    /// Forward scheduler progress events to `tx`.
    pub fn with_progress(mut self, tx: mpsc::Sender<SchedulerEvent>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Runs every validation step with this orchestrator's locale validator.
    pub fn prepare(
        &self,
        invocation: &DeployInvocation,
        catalog: &dyn CatalogSource,
    ) -> Result<(DeployPlan, Concurrency), OrchestratorError> {
        prepare_deployment(invocation, catalog, self.locale_validator.as_ref())
    }

    /// Runs the whole invocation.
    ///
    /// Validation failures are returned as errors. Unit failures are not:
    /// they only show up in the outcome's aggregate status.
    pub async fn run(
        &self,
        invocation: &DeployInvocation,
        catalog: &dyn CatalogSource,
    ) -> Result<DeploymentOutcome, OrchestratorError> {
        let (plan, concurrency) = self.prepare(invocation, catalog)?;
        Ok(self.execute(invocation, plan, concurrency).await)
    }

    /// Reports an already prepared plan and deploys its units.
    pub async fn execute(
        &self,
        invocation: &DeployInvocation,
        plan: DeployPlan,
        concurrency: Concurrency,
    ) -> DeploymentOutcome {
        let report = DeploymentReport::from_plan(&plan);
        for line in report.lines() {
            info!("{}", line);
        }
        if let Some(ref callback) = self.report_callback {
            callback(&report);
        }

        if plan.area_themes.is_empty() {
            warn!("No themes selected, nothing to deploy");
        } else {
            debug!("Deploying themes in {} areas", plan.area_themes.len());
        }

        let units = plan.work_units();
        metrics::UNITS_PLANNED.set(units.len() as i64);

        let mut pool = WorkerPool::new(Arc::clone(&self.deployer), concurrency)
            .with_options(invocation.options.clone());
        if let Some(ref tx) = self.progress_tx {
            pool = pool.with_progress(tx.clone());
        }

        let summary = pool.run(units).await;

        DeploymentOutcome { report, summary }
    }
}

/// Runs every validation step and resolves the deploy plan.
///
/// Nothing is deployed and no deployer is needed, so callers can surface
/// selection errors before building one. Any error aborts the invocation.
pub fn prepare_deployment(
    invocation: &DeployInvocation,
    catalog: &dyn CatalogSource,
    locale_validator: &dyn LocaleValidator,
) -> Result<(DeployPlan, Concurrency), OrchestratorError> {
    invocation.check_precondition()?;
    let concurrency = Concurrency::new(invocation.jobs)?;

    let entries = catalog.entries()?;
    let universe = EntityUniverse::from_entries(&entries);
    debug!(
        "Discovered {} areas, {} themes, {} locales",
        universe.areas.len(),
        universe.themes.len(),
        universe.locales.len()
    );

    let filter = EntityFilter::new(&universe, locale_validator);
    let plan = filter.plan(&invocation.selection)?;

    Ok((plan, concurrency))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::config::AppMode;
    use crate::selection::{LocaleCodeValidator, Selection, SelectionError};
    use crate::testing::{fixtures, MockDeployer};

    fn orchestrator(deployer: &MockDeployer) -> DeployOrchestrator {
        DeployOrchestrator::new(
            Arc::new(deployer.clone()),
            Arc::new(LocaleCodeValidator::new()),
        )
    }

    fn production() -> DeployInvocation {
        DeployInvocation {
            mode: AppMode::Production,
            jobs: 4,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_precondition_blocks_non_production() {
        let deployer = MockDeployer::new();
        let invocation = DeployInvocation {
            mode: AppMode::Developer,
            jobs: 4,
            ..Default::default()
        };

        let err = orchestrator(&deployer)
            .run(&invocation, &fixtures::sample_catalog())
            .await
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::Precondition { .. }));
        assert_eq!(deployer.deploy_count().await, 0);
    }

    #[tokio::test]
    async fn test_force_overrides_precondition() {
        let deployer = MockDeployer::new();
        let invocation = DeployInvocation {
            mode: AppMode::Default,
            force: true,
            jobs: 1,
            ..Default::default()
        };

        let outcome = orchestrator(&deployer)
            .run(&invocation, &fixtures::sample_catalog())
            .await
            .unwrap();
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(deployer.deploy_count().await, 4);
    }

    #[tokio::test]
    async fn test_invalid_jobs_rejected_before_discovery() {
        struct FailingCatalog;
        impl CatalogSource for FailingCatalog {
            fn entries(&self) -> Result<Vec<CatalogEntry>, crate::catalog::CatalogError> {
                panic!("catalog must not be read");
            }
        }

        let deployer = MockDeployer::new();
        let invocation = DeployInvocation {
            jobs: 0,
            ..production()
        };

        let err = orchestrator(&deployer)
            .run(&invocation, &FailingCatalog)
            .await
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::Scheduler(_)));
    }

    #[tokio::test]
    async fn test_report_callback_runs_before_deployment() {
        let deployer = MockDeployer::new();
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen_in_callback = Arc::clone(&seen);
        let callback: ReportCallback = Arc::new(move |report: &DeploymentReport| {
            seen_in_callback
                .lock()
                .unwrap()
                .extend(report.lines().iter().cloned());
        });

        let outcome = orchestrator(&deployer)
            .with_report_callback(callback)
            .run(&production(), &fixtures::sample_catalog())
            .await
            .unwrap();

        let lines = seen.lock().unwrap().clone();
        assert_eq!(
            lines,
            vec![
                "Requested languages: en_US, fr_FR",
                "Requested areas: frontend",
                "Requested themes: blank, luma",
            ]
        );
        assert_eq!(outcome.report.areas, vec!["frontend"]);
    }

    #[tokio::test]
    async fn test_selection_error_aborts_without_deploying() {
        let deployer = MockDeployer::new();
        let invocation = DeployInvocation {
            selection: crate::selection::SelectionSpec {
                themes: Selection::including(["Vendor/missing"]),
                ..Default::default()
            },
            ..production()
        };

        let err = orchestrator(&deployer)
            .run(&invocation, &fixtures::sample_catalog())
            .await
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::Selection(_)));
        assert_eq!(deployer.deploy_count().await, 0);
    }

    #[tokio::test]
    async fn test_prepare_without_deployer_then_execute() {
        let invocation = DeployInvocation {
            jobs: 2,
            ..production()
        };
        let (plan, concurrency) = prepare_deployment(
            &invocation,
            &fixtures::sample_catalog(),
            &LocaleCodeValidator::new(),
        )
        .unwrap();
        assert_eq!(concurrency.get(), 2);

        let deployer = MockDeployer::new();
        let outcome = orchestrator(&deployer)
            .execute(&invocation, plan, concurrency)
            .await;
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(deployer.deploy_count().await, 4);
    }

    #[test]
    fn test_prepare_reports_conflict_without_deployer() {
        let invocation = DeployInvocation {
            selection: crate::selection::SelectionSpec {
                areas: Selection::new(["frontend"], ["adminhtml"]),
                ..Default::default()
            },
            ..production()
        };

        let err = prepare_deployment(
            &invocation,
            &fixtures::sample_catalog(),
            &LocaleCodeValidator::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::Selection(SelectionError::ConflictingSelection { .. })
        ));
    }
}
