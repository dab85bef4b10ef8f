//! Error types for regatta-flow.

use thiserror::Error;

use regatta_adapter::AdapterError;
use regatta_model::{ExecutionId, RegistryType, ResourceType};

use crate::execution::StoreError;
use crate::pattern::PatternError;
use crate::scheduler::SchedulerError;

/// All errors that can abort a replication run.
///
/// Every stage-level error aborts the whole run. The one exception is
/// reconciliation after scheduling: per-task failures there are isolated,
/// and only [`FlowError::AllTasksFailed`] is surfaced.
#[derive(Debug, Error)]
pub enum FlowError {
    /// No adapter factory is registered for a registry product type.
    #[error("no adapter factory registered for registry type {kind}")]
    AdapterFactoryNotFound { kind: RegistryType },

    /// Adapter instantiation failed (unreachable or misconfigured registry).
    #[error("failed to create adapter for registry {url}: {source}")]
    AdapterInit {
        url: String,
        #[source]
        source: AdapterError,
    },

    /// The adapter's capability set could not be read.
    #[error("failed to get the adapter info: {source}")]
    AdapterInfo {
        #[source]
        source: AdapterError,
    },

    /// A resource type was requested that the adapter cannot enumerate.
    /// A configuration error, not a skip.
    #[error("the adapter does not support {resource_type} discovery")]
    CapabilityMismatch { resource_type: ResourceType },

    /// Discovery of one resource type failed on the adapter.
    #[error("failed to fetch {resource_type} resources: {source}")]
    Discovery {
        resource_type: ResourceType,
        #[source]
        source: AdapterError,
    },

    /// A name or tag pattern failed to compile or match.
    #[error("pattern match failed: {0}")]
    Pattern(#[from] PatternError),

    /// Source namespace lookup failed during destination assembly.
    #[error("failed to get namespace {name} from the source registry: {source}")]
    NamespaceLookup {
        name: String,
        #[source]
        source: AdapterError,
    },

    /// Namespace creation on the destination registry failed. Namespaces
    /// created before the failure are left in place.
    #[error("failed to create the namespace {name} on the destination registry: {source}")]
    NamespaceCreate {
        name: String,
        #[source]
        source: AdapterError,
    },

    /// The scheduler collaborator failed as a whole (preprocess or submit).
    #[error("scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// Task record creation failed; no further items are submitted and
    /// rows already created stay Initialized.
    #[error("failed to create task records for the execution {execution_id}: {source}")]
    TaskPersist {
        execution_id: ExecutionId,
        #[source]
        source: StoreError,
    },

    /// Every scheduled task failed to be submitted.
    #[error("all {count} tasks are failed")]
    AllTasksFailed { count: usize },
}
