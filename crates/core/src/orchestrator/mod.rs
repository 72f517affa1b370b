//! Deployment orchestrator.
//!
//! Turns a [`DeployInvocation`] and a catalog into deployed units and one
//! exit status. Validation errors abort before anything is deployed; unit
//! failures only affect the aggregate status.

mod runner;
mod types;

pub use runner::{prepare_deployment, DeployOrchestrator, ReportCallback};
pub use types::{DeployInvocation, DeploymentOutcome, DeploymentReport, OrchestratorError};
