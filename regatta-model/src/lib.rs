//! # regatta-model
//!
//! Domain types shared by the Regatta replication engine: policies,
//! registries, discoverable resources, namespaces, filters and task
//! records. Policies are plain serde types and can be loaded from YAML
//! via [`policy::load_policy`].

pub mod error;
pub mod filter;
pub mod policy;
pub mod types;

pub use error::ModelError;
pub use filter::Filter;
pub use policy::{load_policy, Policy};
pub use types::{
    resource_name, Credential, ExecutionId, JobId, Namespace, Operation, Registry, RegistryType,
    Resource, ResourceMetadata, ResourceType, Task, TaskId, TaskStatus,
};
