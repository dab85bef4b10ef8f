//! Job scheduler collaborator contract.
//!
//! The scheduler turns resource pairs into an ordered list of
//! [`ScheduleItem`]s (diffing away no-op pairs, marking deletions) and
//! submits them as background jobs. Both calls are synchronous
//! submit-and-report; retry and backoff of individual jobs belong to the
//! scheduler and job runner, never to this flow.

use thiserror::Error;

use regatta_model::{JobId, Resource, TaskId};

/// A scheduler-level failure affecting a whole call or a single item.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct SchedulerError(pub String);

impl SchedulerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The atomic unit handed to the scheduler: a source resource, its
/// computed destination counterpart, and the backing task record.
///
/// `task_id` is `None` only between preprocessing and task creation; an
/// item is never submitted without one.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleItem {
    pub src_resource: Resource,
    pub dst_resource: Resource,
    pub task_id: Option<TaskId>,
}

impl ScheduleItem {
    pub fn new(src_resource: Resource, dst_resource: Resource) -> Self {
        Self {
            src_resource,
            dst_resource,
            task_id: None,
        }
    }
}

/// Per-item submission outcome reported back by the scheduler.
#[derive(Debug, Clone)]
pub struct ScheduleResult {
    pub task_id: TaskId,
    pub job_id: Option<JobId>,
    pub error: Option<SchedulerError>,
}

/// Synchronous submit-and-report job scheduler.
pub trait Scheduler {
    /// Turn (source, destination) pairs into an ordered list of items to
    /// submit. Diffing logic lives here, not in the flow.
    fn preprocess(
        &self,
        src_resources: &[Resource],
        dst_resources: &[Resource],
    ) -> Result<Vec<ScheduleItem>, SchedulerError>;

    /// Submit every item as a background job, reporting one result per
    /// item. An implementation that errors before submitting anything may
    /// return fewer results.
    fn schedule(&self, items: &[ScheduleItem]) -> Result<Vec<ScheduleResult>, SchedulerError>;
}
