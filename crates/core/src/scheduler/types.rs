//! Types for the worker-pool scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};
use thiserror::Error;

use crate::deployer::STATUS_SUCCESS;
use crate::work::WorkUnit;

/// Errors raised before scheduling starts.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Job count is not a positive integer.
    #[error("--jobs (-j) argument has invalid value. It must be greater than 0")]
    InvalidConcurrency { jobs: i64 },
}

/// OR-combination of every finished unit's status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStatus(i32);

impl AggregateStatus {
    pub fn new() -> Self {
        Self(STATUS_SUCCESS)
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn is_success(&self) -> bool {
        self.0 == STATUS_SUCCESS
    }

    /// Process exit code: 0 when every unit succeeded, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

impl BitOr<i32> for AggregateStatus {
    type Output = Self;

    fn bitor(self, status: i32) -> Self {
        Self(self.0 | status)
    }
}

impl BitOrAssign<i32> for AggregateStatus {
    fn bitor_assign(&mut self, status: i32) {
        self.0 |= status;
    }
}

impl FromIterator<i32> for AggregateStatus {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |acc, status| acc | status)
    }
}

/// How the scheduler runs units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// One unit at a time, in enumeration order.
    Sequential,
    /// Up to the concurrency limit at once.
    Parallel,
}

/// Progress notifications published while units run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerEvent {
    UnitStarted {
        unit: WorkUnit,
        /// Active workers including this one.
        active: usize,
    },
    UnitFinished {
        unit: WorkUnit,
        status: i32,
        /// Active workers after this one was reaped.
        active: usize,
    },
}

/// Outcome of a scheduler run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub mode: ExecutionMode,
    pub status: AggregateStatus,
    pub units_total: usize,
    pub units_failed: usize,
    /// Highest number of units observed running at once.
    pub peak_active: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }

    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}
