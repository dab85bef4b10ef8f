//! Task persistence collaborator contract.
//!
//! Durable storage for task records and their status transitions. The
//! flow only needs create and update primitives; queries, retention and
//! orphan reconciliation are the surrounding application's concern.

use chrono::{DateTime, Utc};
use thiserror::Error;

use regatta_model::{JobId, Task, TaskId, TaskStatus};

/// A persistence-level failure.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Durable store for the tasks of an execution.
pub trait ExecutionManager {
    /// Persist a new task record, returning its assigned id.
    fn create_task(&self, task: &Task) -> Result<TaskId, StoreError>;

    /// Transition a task to `status`. When `expect` is set the update
    /// applies only if the current status matches, guarding against a
    /// race with an already-updated task.
    fn update_task_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
        expect: Option<TaskStatus>,
    ) -> Result<(), StoreError>;

    /// Persist the submitted job id and start time on a task.
    fn update_task(
        &self,
        task_id: TaskId,
        job_id: &JobId,
        start_time: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}
