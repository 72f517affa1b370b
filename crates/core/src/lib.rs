//! Orchestration core for static view asset deployment.
//!
//! Resolves which areas, themes and locales an operator wants deployed,
//! expands them into independent work units and runs those units through
//! a bounded worker pool, folding every unit's status into one result.

pub mod catalog;
pub mod config;
pub mod deployer;
pub mod metrics;
pub mod orchestrator;
pub mod scheduler;
pub mod selection;
pub mod testing;
pub mod work;

pub use catalog::{
    load_catalog, parse_catalog, AreaThemeMap, CatalogEntry, CatalogError, CatalogSource,
    EntityKind, EntityUniverse, FileCatalog, DEFAULT_LOCALE,
};
pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, AppMode, Config,
    ConfigError,
};
pub use deployer::{
    create_deployer, CommandDeployer, DeployOptions, DeployRequest, Deployer, DeployerError,
    DryRunDeployer, ExecutorConfig,
};
pub use orchestrator::{
    prepare_deployment, DeployInvocation, DeployOrchestrator, DeploymentOutcome,
    DeploymentReport, OrchestratorError, ReportCallback,
};
pub use scheduler::{
    AggregateStatus, Concurrency, ExecutionMode, RunSummary, SchedulerError, SchedulerEvent,
    WorkerPool, DEFAULT_JOBS,
};
pub use selection::{
    DeployPlan, EntityFilter, LocaleCodeValidator, LocaleValidator, Selection, SelectionError,
    SelectionSpec,
};
pub use work::{enumerate, WorkUnit};
