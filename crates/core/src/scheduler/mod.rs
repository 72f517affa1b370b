//! Bounded worker-pool scheduler.
//!
//! Consumes the enumerated work units and deploys them either one at a
//! time or with up to N units in flight. Each in-flight unit runs in its
//! own task; completions are awaited rather than polled, and a freed slot
//! is refilled from the pending queue in enumeration order.
//!
//! Sequential mode is used when the job count is 1 or the deployer cannot
//! run units concurrently.
//!
//! # Example
//!
//! ```ignore
//! use static_deploy_core::scheduler::{Concurrency, WorkerPool};
//!
//! let pool = WorkerPool::new(deployer, Concurrency::new(4)?);
//! let summary = pool.run(plan.work_units()).await;
//! std::process::exit(summary.exit_code());
//! ```

mod config;
mod pool;
mod types;

pub use config::{Concurrency, DEFAULT_JOBS};
pub use pool::WorkerPool;
pub use types::{AggregateStatus, ExecutionMode, RunSummary, SchedulerError, SchedulerEvent};
