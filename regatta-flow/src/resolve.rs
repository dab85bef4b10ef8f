//! Adapter resolution for one replication run.

use regatta_adapter::{Adapter, AdapterRegistry};
use regatta_model::{Policy, Registry};

use crate::error::FlowError;

/// Resolve the source and destination adapters for `policy`.
///
/// Each side resolves independently: a type-keyed factory lookup followed
/// by instantiation against the corresponding registry.
pub fn resolve_adapters(
    registry: &AdapterRegistry,
    policy: &Policy,
) -> Result<(Box<dyn Adapter>, Box<dyn Adapter>), FlowError> {
    let src = resolve_adapter(registry, &policy.src_registry)?;
    let dst = resolve_adapter(registry, &policy.dst_registry)?;
    tracing::debug!("replication flow initialization completed");
    Ok((src, dst))
}

fn resolve_adapter(
    registry: &AdapterRegistry,
    target: &Registry,
) -> Result<Box<dyn Adapter>, FlowError> {
    let factory = registry
        .factory_for(&target.kind)
        .ok_or_else(|| FlowError::AdapterFactoryNotFound {
            kind: target.kind.clone(),
        })?;
    factory.create(target).map_err(|e| FlowError::AdapterInit {
        url: target.url.clone(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
