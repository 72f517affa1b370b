//! Error types for the deployer module.

use std::path::PathBuf;
use thiserror::Error;

use super::types::STATUS_FAILURE;

/// Errors raised by a deployer while running a unit.
#[derive(Debug, Error)]
pub enum DeployerError {
    /// The deploy command could not be started.
    #[error("Failed to spawn deploy command {program}: {source}")]
    SpawnFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The deploy command exited with a non-zero code.
    #[error("Deploy command exited with status {code}")]
    NonZeroExit { code: i32 },

    /// The deploy command was terminated by a signal.
    #[error("Deploy command was terminated by a signal")]
    Terminated,

    /// The deployer has no usable command configured.
    #[error("Invalid deploy command: {reason}")]
    InvalidCommand { reason: String },

}

impl DeployerError {
    /// Status code this failure contributes to the aggregate.
    pub fn status(&self) -> i32 {
        match self {
            Self::NonZeroExit { code } if *code != 0 => *code,
            _ => STATUS_FAILURE,
        }
    }
}
