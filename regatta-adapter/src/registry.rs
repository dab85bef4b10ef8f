//! Type-keyed adapter factory registry.
//!
//! The surrounding application registers one factory per registry
//! product at startup; the flow resolves adapters from it per run. The
//! registry is an owned value handed to the flow by reference, so no
//! process-global state is involved.

use std::collections::HashMap;

use regatta_model::{Registry, RegistryType};

use crate::{Adapter, AdapterError};

/// Builds an [`Adapter`] bound to one registry endpoint.
///
/// Implemented for free by any `Fn(&Registry) -> Result<Box<dyn Adapter>,
/// AdapterError>` closure.
pub trait AdapterFactory {
    fn create(&self, registry: &Registry) -> Result<Box<dyn Adapter>, AdapterError>;
}

impl<F> AdapterFactory for F
where
    F: Fn(&Registry) -> Result<Box<dyn Adapter>, AdapterError>,
{
    fn create(&self, registry: &Registry) -> Result<Box<dyn Adapter>, AdapterError> {
        self(registry)
    }
}

/// Registry of adapter factories keyed by registry product type.
#[derive(Default)]
pub struct AdapterRegistry {
    factories: HashMap<RegistryType, Box<dyn AdapterFactory>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for `kind`, replacing any previous one.
    pub fn register(&mut self, kind: RegistryType, factory: Box<dyn AdapterFactory>) {
        tracing::debug!("adapter factory registered for registry type {kind}");
        self.factories.insert(kind, factory);
    }

    /// Look up the factory for `kind`.
    pub fn factory_for(&self, kind: &RegistryType) -> Option<&dyn AdapterFactory> {
        self.factories.get(kind).map(|f| f.as_ref())
    }

    /// Registry types a factory is registered for, in no particular order.
    pub fn registered_types(&self) -> impl Iterator<Item = &RegistryType> {
        self.factories.keys()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
