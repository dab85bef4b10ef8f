//! # regatta-adapter
//!
//! Capability-typed adapter contract between the replication flow and
//! concrete registry backends, plus the type-keyed factory registry used
//! to resolve one. Adapters implement the actual network calls; this
//! crate only defines the seam.

pub mod error;
pub mod registry;

pub use error::AdapterError;
pub use registry::{AdapterFactory, AdapterRegistry};

use regatta_model::{Filter, Namespace, Resource, ResourceType};

/// Registry-level capability description, reported by an adapter after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdapterInfo {
    pub supported_resource_types: Vec<ResourceType>,
}

/// A handle bound to one registry for the duration of a replication run.
///
/// Capability negotiation is explicit: the `image_registry` and
/// `chart_registry` accessors return `None` when the backend cannot
/// enumerate that artifact kind, and the flow turns a `None` on a
/// requested kind into a hard configuration error, never a skip.
pub trait Adapter {
    /// Supported artifact kinds and other registry-level facts.
    fn info(&self) -> Result<AdapterInfo, AdapterError>;

    /// Image discovery operations, when the backend supports them.
    fn image_registry(&self) -> Option<&dyn ImageRegistry> {
        None
    }

    /// Chart discovery operations, when the backend supports them.
    fn chart_registry(&self) -> Option<&dyn ChartRegistry> {
        None
    }

    /// Fetch one namespace by name, with its backend metadata.
    fn get_namespace(&self, name: &str) -> Result<Namespace, AdapterError>;

    /// Create a namespace. Must be idempotent: re-creating an existing
    /// namespace is not an error.
    fn create_namespace(&self, namespace: &Namespace) -> Result<(), AdapterError>;
}

/// Image-capability operation set.
pub trait ImageRegistry {
    /// Enumerate image repositories in `namespaces` (all reachable ones
    /// when empty), pre-filtered server-side where the backend can.
    fn fetch_images(
        &self,
        namespaces: &[String],
        filters: &[Filter],
    ) -> Result<Vec<Resource>, AdapterError>;
}

/// Chart-capability operation set.
pub trait ChartRegistry {
    fn fetch_charts(
        &self,
        namespaces: &[String],
        filters: &[Filter],
    ) -> Result<Vec<Resource>, AdapterError>;
}
