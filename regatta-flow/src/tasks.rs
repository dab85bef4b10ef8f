//! Task creation, scheduling and reconciliation.
//!
//! Two-phase protocol with no overlap: every schedule item gets a durable
//! task record first, then the whole list is submitted to the scheduler
//! in one call and the per-item results are reconciled into status
//! transitions. Before scheduling begins any failure aborts the run; once
//! results come back, per-task failures are isolated and only a total
//! failure is surfaced as an error.

use chrono::Utc;

use regatta_model::{resource_name, ExecutionId, JobId, Operation, Task, TaskId, TaskStatus};

use crate::error::FlowError;
use crate::execution::{ExecutionManager, StoreError};
use crate::scheduler::{ScheduleItem, Scheduler};

/// Outcome of the scheduling phase.
///
/// `update_failures` is the best-effort side channel for status-update
/// calls that failed during reconciliation: logged, collected, never
/// escalated — a failed update must not mask the primary scheduling
/// result or block reconciliation of later items.
#[derive(Debug)]
pub struct ScheduleReport {
    /// Number of per-item results the scheduler reported.
    pub attempted: usize,
    pub update_failures: Vec<UpdateFailure>,
}

/// One failed status or field update during reconciliation.
#[derive(Debug)]
pub struct UpdateFailure {
    pub task_id: TaskId,
    pub error: StoreError,
}

/// Persist one task record per schedule item, in order, storing the
/// returned id back onto the item.
///
/// The first persistence failure aborts immediately: no further items
/// are submitted and no compensating deletion happens — rows already
/// created remain Initialized for external reconciliation.
pub fn create_tasks(
    manager: &dyn ExecutionManager,
    execution_id: ExecutionId,
    items: &mut [ScheduleItem],
) -> Result<(), FlowError> {
    for item in items.iter_mut() {
        let operation = if item.dst_resource.deleted {
            Operation::Deletion
        } else {
            Operation::Copy
        };
        let task = Task {
            execution_id,
            status: TaskStatus::Initialized,
            resource_type: item.src_resource.kind,
            src_resource: resource_name(&item.src_resource),
            dst_resource: resource_name(&item.dst_resource),
            operation,
            job_id: None,
            start_time: None,
        };
        let id = manager
            .create_task(&task)
            .map_err(|e| FlowError::TaskPersist {
                execution_id,
                source: e,
            })?;
        item.task_id = Some(id);
        tracing::debug!("task record {id} for the execution {execution_id} created");
    }
    Ok(())
}

/// Submit `items` to the scheduler and reconcile the per-item results
/// into task status transitions.
///
/// An erroring result transitions its task to Failed; a successful one
/// transitions Initialized → Pending (guarded on the current status) and
/// persists the job id and start time. Returns the attempted count, or
/// [`FlowError::AllTasksFailed`] when every single result carried an
/// error — any success means partial failure, which is not an error.
pub fn schedule(
    scheduler: &dyn Scheduler,
    manager: &dyn ExecutionManager,
    items: &[ScheduleItem],
) -> Result<ScheduleReport, FlowError> {
    let results = scheduler.schedule(items)?;

    let attempted = results.len();
    let mut all_failed = true;
    let mut update_failures = Vec::new();
    for result in results {
        let task_id = result.task_id;
        if let Some(err) = result.error {
            tracing::error!("failed to schedule the task {task_id}: {err}");
            if let Err(e) = manager.update_task_status(task_id, TaskStatus::Failed, None) {
                tracing::error!("failed to update the task status {task_id}: {e}");
                update_failures.push(UpdateFailure { task_id, error: e });
            }
            continue;
        }
        all_failed = false;
        if let Err(e) =
            manager.update_task_status(task_id, TaskStatus::Pending, Some(TaskStatus::Initialized))
        {
            tracing::error!("failed to update the task status {task_id}: {e}");
            update_failures.push(UpdateFailure { task_id, error: e });
        }
        // Job fields are persisted even without a job id, so a scheduler
        // that cannot name its jobs still records when the task started.
        let job_id = result
            .job_id
            .clone()
            .unwrap_or_else(|| JobId(String::new()));
        if let Err(e) = manager.update_task(task_id, &job_id, Utc::now()) {
            tracing::error!("failed to update the task {task_id}: {e}");
            update_failures.push(UpdateFailure { task_id, error: e });
        }
        tracing::debug!("the task {task_id} scheduled");
    }

    if all_failed {
        return Err(FlowError::AllTasksFailed { count: attempted });
    }
    Ok(ScheduleReport {
        attempted,
        update_failures,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{ScheduleResult, SchedulerError};
    use crate::testutil::repository;
    use chrono::DateTime;
    use std::cell::RefCell;

    /// Records every store call; fails `create_task` on a chosen index
    /// and `update_task_status` for chosen task ids.
    #[derive(Default)]
    struct RecordingStore {
        created: RefCell<Vec<Task>>,
        status_updates: RefCell<Vec<(TaskId, TaskStatus, Option<TaskStatus>)>>,
        field_updates: RefCell<Vec<(TaskId, JobId, DateTime<Utc>)>>,
        fail_create_at: Option<usize>,
        fail_status_for: Vec<TaskId>,
    }

    impl ExecutionManager for RecordingStore {
        fn create_task(&self, task: &Task) -> Result<TaskId, StoreError> {
            let index = self.created.borrow().len();
            if self.fail_create_at == Some(index) {
                return Err(StoreError::new("database unavailable"));
            }
            self.created.borrow_mut().push(task.clone());
            Ok(TaskId(index as i64 + 1))
        }

        fn update_task_status(
            &self,
            task_id: TaskId,
            status: TaskStatus,
            expect: Option<TaskStatus>,
        ) -> Result<(), StoreError> {
            if self.fail_status_for.contains(&task_id) {
                return Err(StoreError::new("row locked"));
            }
            self.status_updates
                .borrow_mut()
                .push((task_id, status, expect));
            Ok(())
        }

        fn update_task(
            &self,
            task_id: TaskId,
            job_id: &JobId,
            start_time: DateTime<Utc>,
        ) -> Result<(), StoreError> {
            self.field_updates
                .borrow_mut()
                .push((task_id, job_id.clone(), start_time));
            Ok(())
        }
    }

    /// Scripted scheduler: returns canned results, records whether
    /// `schedule` was invoked.
    #[derive(Default)]
    struct ScriptedScheduler {
        results: Vec<ScheduleResult>,
        invoked: RefCell<bool>,
    }

    impl Scheduler for ScriptedScheduler {
        fn preprocess(
            &self,
            src_resources: &[regatta_model::Resource],
            dst_resources: &[regatta_model::Resource],
        ) -> Result<Vec<ScheduleItem>, SchedulerError> {
            Ok(src_resources
                .iter()
                .zip(dst_resources)
                .map(|(s, d)| ScheduleItem::new(s.clone(), d.clone()))
                .collect())
        }

        fn schedule(&self, _items: &[ScheduleItem]) -> Result<Vec<ScheduleResult>, SchedulerError> {
            *self.invoked.borrow_mut() = true;
            Ok(self.results.clone())
        }
    }

    fn items(n: usize) -> Vec<ScheduleItem> {
        (0..n)
            .map(|i| {
                let src = repository(&format!("library/app-{i}"), "library", &["1.0"]);
                let dst = repository(&format!("prod/app-{i}"), "prod", &["1.0"]);
                ScheduleItem::new(src, dst)
            })
            .collect()
    }

    fn ok_result(id: i64) -> ScheduleResult {
        ScheduleResult {
            task_id: TaskId(id),
            job_id: Some(JobId::from(format!("job-{id}"))),
            error: None,
        }
    }

    fn err_result(id: i64) -> ScheduleResult {
        ScheduleResult {
            task_id: TaskId(id),
            job_id: None,
            error: Some(SchedulerError::new("queue full")),
        }
    }

    // -- create_tasks -------------------------------------------------------

    #[test]
    fn creates_one_initialized_task_per_item_and_stores_ids() {
        let store = RecordingStore::default();
        let mut batch = items(2);
        create_tasks(&store, ExecutionId(9), &mut batch).expect("create");

        let created = store.created.borrow();
        assert_eq!(created.len(), 2);
        assert_eq!(created[0].execution_id, ExecutionId(9));
        assert_eq!(created[0].status, TaskStatus::Initialized);
        assert_eq!(created[0].operation, Operation::Copy);
        assert_eq!(created[0].src_resource, "library/app-0:[1.0]");
        assert_eq!(created[0].dst_resource, "prod/app-0:[1.0]");
        assert_eq!(batch[0].task_id, Some(TaskId(1)));
        assert_eq!(batch[1].task_id, Some(TaskId(2)));
    }

    #[test]
    fn deleted_destination_becomes_a_deletion_task() {
        let store = RecordingStore::default();
        let mut batch = items(1);
        batch[0].dst_resource.deleted = true;
        create_tasks(&store, ExecutionId(1), &mut batch).expect("create");
        assert_eq!(store.created.borrow()[0].operation, Operation::Deletion);
    }

    #[test]
    fn create_failure_aborts_remaining_items() {
        let store = RecordingStore {
            fail_create_at: Some(1),
            ..RecordingStore::default()
        };
        let mut batch = items(3);
        let err = create_tasks(&store, ExecutionId(4), &mut batch).unwrap_err();
        assert!(
            matches!(err, FlowError::TaskPersist { execution_id, .. } if execution_id == ExecutionId(4))
        );
        // Exactly one task exists; item 3 was never submitted.
        assert_eq!(store.created.borrow().len(), 1);
        assert_eq!(batch[0].task_id, Some(TaskId(1)));
        assert_eq!(batch[1].task_id, None);
        assert_eq!(batch[2].task_id, None);
    }

    // -- schedule -----------------------------------------------------------

    #[test]
    fn successful_results_transition_to_pending_with_job_fields() {
        let store = RecordingStore::default();
        let scheduler = ScriptedScheduler {
            results: vec![ok_result(1), ok_result(2)],
            ..ScriptedScheduler::default()
        };
        let report = schedule(&scheduler, &store, &items(2)).expect("schedule");
        assert!(*scheduler.invoked.borrow());
        assert_eq!(report.attempted, 2);
        assert!(report.update_failures.is_empty());

        let statuses = store.status_updates.borrow();
        assert_eq!(
            statuses[0],
            (TaskId(1), TaskStatus::Pending, Some(TaskStatus::Initialized))
        );
        let fields = store.field_updates.borrow();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].1, JobId::from("job-1"));
    }

    #[test]
    fn partial_failure_is_not_an_error() {
        let store = RecordingStore::default();
        let scheduler = ScriptedScheduler {
            results: vec![ok_result(1), err_result(2), ok_result(3)],
            ..ScriptedScheduler::default()
        };
        let report = schedule(&scheduler, &store, &items(3)).expect("partial success");
        assert_eq!(report.attempted, 3);

        let statuses = store.status_updates.borrow();
        assert_eq!(statuses.len(), 3);
        assert_eq!(statuses[1], (TaskId(2), TaskStatus::Failed, None));
        // Tasks 1 and 3 got job fields; task 2 did not.
        let fields = store.field_updates.borrow();
        let ids: Vec<_> = fields.iter().map(|f| f.0).collect();
        assert_eq!(ids, vec![TaskId(1), TaskId(3)]);
    }

    #[test]
    fn all_failed_results_surface_the_aggregate_error() {
        let store = RecordingStore::default();
        let scheduler = ScriptedScheduler {
            results: vec![err_result(1), err_result(2), err_result(3)],
            ..ScriptedScheduler::default()
        };
        let err = schedule(&scheduler, &store, &items(3)).unwrap_err();
        assert!(matches!(err, FlowError::AllTasksFailed { count: 3 }));
        // Every task still transitioned to Failed.
        let statuses = store.status_updates.borrow();
        assert!(statuses.iter().all(|(_, s, _)| *s == TaskStatus::Failed));
    }

    #[test]
    fn status_update_failures_are_collected_not_escalated() {
        let store = RecordingStore {
            fail_status_for: vec![TaskId(2)],
            ..RecordingStore::default()
        };
        let scheduler = ScriptedScheduler {
            results: vec![ok_result(1), ok_result(2), ok_result(3)],
            ..ScriptedScheduler::default()
        };
        let report = schedule(&scheduler, &store, &items(3)).expect("still a success");
        assert_eq!(report.attempted, 3);
        assert_eq!(report.update_failures.len(), 1);
        assert_eq!(report.update_failures[0].task_id, TaskId(2));
        // Task 3 was still reconciled after task 2's update failed.
        assert!(store
            .status_updates
            .borrow()
            .iter()
            .any(|(id, _, _)| *id == TaskId(3)));
    }

    #[test]
    fn success_without_a_job_id_still_records_the_start_time() {
        let store = RecordingStore::default();
        let scheduler = ScriptedScheduler {
            results: vec![ScheduleResult {
                task_id: TaskId(1),
                job_id: None,
                error: None,
            }],
            ..ScriptedScheduler::default()
        };
        schedule(&scheduler, &store, &items(1)).expect("schedule");

        let fields = store.field_updates.borrow();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, TaskId(1));
        assert_eq!(fields[0].1, JobId(String::new()));
    }

    #[test]
    fn empty_result_set_counts_as_all_failed() {
        // Nothing succeeded, so the aggregate error fires with count 0.
        let store = RecordingStore::default();
        let scheduler = ScriptedScheduler::default();
        let err = schedule(&scheduler, &store, &[]).unwrap_err();
        assert!(matches!(err, FlowError::AllTasksFailed { count: 0 }));
    }

    #[test]
    fn scheduler_failure_aborts_before_reconciliation() {
        struct FailingScheduler;
        impl Scheduler for FailingScheduler {
            fn preprocess(
                &self,
                _: &[regatta_model::Resource],
                _: &[regatta_model::Resource],
            ) -> Result<Vec<ScheduleItem>, SchedulerError> {
                Ok(vec![])
            }
            fn schedule(
                &self,
                _: &[ScheduleItem],
            ) -> Result<Vec<ScheduleResult>, SchedulerError> {
                Err(SchedulerError::new("job service down"))
            }
        }
        let store = RecordingStore::default();
        let err = schedule(&FailingScheduler, &store, &items(1)).unwrap_err();
        assert!(matches!(err, FlowError::Scheduler(_)));
        assert!(store.status_updates.borrow().is_empty());
    }
}
