//! # regatta-flow
//!
//! The replication pipeline: resolve adapters, discover resources on the
//! source, filter them, prepare destination namespaces, project each
//! source resource onto its destination counterpart, then create and
//! schedule one task per unit of work.
//!
//! Call [`ReplicationFlow::run`] with an execution id and a policy; the
//! result is a [`ScheduleReport`] or the first stage-level error. Once
//! scheduling has begun, per-task failures no longer abort the run —
//! partial success is the expected steady state, and only "every task
//! failed" is surfaced as an error.

pub mod destination;
pub mod discover;
pub mod error;
pub mod execution;
pub mod filter;
pub mod flow;
pub mod namespace;
pub mod pattern;
pub mod resolve;
pub mod scheduler;
pub mod tasks;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::FlowError;
pub use execution::{ExecutionManager, StoreError};
pub use flow::ReplicationFlow;
pub use pattern::{GlobMatcher, PatternError, PatternMatcher};
pub use scheduler::{ScheduleItem, ScheduleResult, Scheduler, SchedulerError};
pub use tasks::{ScheduleReport, UpdateFailure};
