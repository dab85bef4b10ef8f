//! The replication flow driver.

use regatta_adapter::AdapterRegistry;
use regatta_model::{ExecutionId, Policy};

use crate::error::FlowError;
use crate::execution::ExecutionManager;
use crate::pattern::PatternMatcher;
use crate::scheduler::Scheduler;
use crate::tasks::ScheduleReport;
use crate::{destination, discover, filter, namespace, resolve, tasks};

/// One replication run's collaborators, wired together.
///
/// Everything here is run-scoped: the adapter registry is read-only
/// during a run and concurrent runs share no mutable state.
pub struct ReplicationFlow<'a> {
    pub adapters: &'a AdapterRegistry,
    pub scheduler: &'a dyn Scheduler,
    pub executions: &'a dyn ExecutionManager,
    pub matcher: &'a dyn PatternMatcher,
}

impl<'a> ReplicationFlow<'a> {
    pub fn new(
        adapters: &'a AdapterRegistry,
        scheduler: &'a dyn Scheduler,
        executions: &'a dyn ExecutionManager,
        matcher: &'a dyn PatternMatcher,
    ) -> Self {
        Self {
            adapters,
            scheduler,
            executions,
            matcher,
        }
    }

    /// Run the end-to-end replication described by `policy` under
    /// `execution_id`.
    ///
    /// Sequences adapter resolution, discovery, filtering, namespace
    /// preparation, destination assembly, task creation and scheduling.
    /// Data flows strictly left to right; any stage-level failure before
    /// scheduling aborts the run, after which per-task failures are
    /// reported through the [`ScheduleReport`].
    pub fn run(
        &self,
        execution_id: ExecutionId,
        policy: &Policy,
    ) -> Result<ScheduleReport, FlowError> {
        let (src_adapter, dst_adapter) = resolve::resolve_adapters(self.adapters, policy)?;

        let (resources, filters) = discover::fetch_resources(src_adapter.as_ref(), policy)?;
        let resources = filter::filter_resources(resources, &filters, self.matcher)?;

        let namespaces = namespace::assemble_destination_namespaces(
            src_adapter.as_ref(),
            &resources,
            policy.dst_namespace.as_deref(),
        )?;
        namespace::create_namespaces(dst_adapter.as_ref(), &namespaces)?;

        let dst_resources = destination::assemble_destination_resources(
            &resources,
            &policy.dst_registry,
            policy.dst_namespace.as_deref(),
            policy.overwrite,
        );

        let mut items = self.scheduler.preprocess(&resources, &dst_resources)?;
        tracing::debug!("preprocess the resources completed");

        tasks::create_tasks(self.executions, execution_id, &mut items)?;
        tasks::schedule(self.scheduler, self.executions, &items)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
