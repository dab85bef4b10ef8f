//! Destination namespace assembly and creation.

use std::collections::BTreeMap;

use regatta_adapter::Adapter;
use regatta_model::{Namespace, Resource};

use crate::error::FlowError;

/// Derive the namespaces that must exist on the destination registry.
///
/// Without an override, every filtered resource's owning namespace is
/// fetched from the source adapter, duplicates included — creation must
/// tolerate idempotent re-creation. With an override, exactly one
/// synthetic namespace with the override name is returned; merging the
/// source namespaces' metadata into it is a declared open gap, so its
/// metadata stays empty.
pub fn assemble_destination_namespaces(
    src_adapter: &dyn Adapter,
    resources: &[Resource],
    dst_namespace: Option<&str>,
) -> Result<Vec<Namespace>, FlowError> {
    if let Some(name) = dst_namespace {
        tracing::debug!("assemble the destination namespaces completed");
        return Ok(vec![Namespace {
            name: name.to_owned(),
            metadata: BTreeMap::new(),
        }]);
    }

    let mut namespaces = Vec::new();
    for resource in resources {
        // A resource without metadata has no namespace to land in.
        let Some(meta) = &resource.metadata else {
            continue;
        };
        let namespace = src_adapter
            .get_namespace(&meta.namespace)
            .map_err(|e| FlowError::NamespaceLookup {
                name: meta.namespace.clone(),
                source: e,
            })?;
        namespaces.push(namespace);
    }
    tracing::debug!("assemble the destination namespaces completed");
    Ok(namespaces)
}

/// Create `namespaces` on the destination registry, in order.
///
/// The first failure aborts the remaining creations; namespaces already
/// created are left in place (creation is idempotent and safe to retry).
pub fn create_namespaces(
    dst_adapter: &dyn Adapter,
    namespaces: &[Namespace],
) -> Result<(), FlowError> {
    for namespace in namespaces {
        dst_adapter
            .create_namespace(namespace)
            .map_err(|e| FlowError::NamespaceCreate {
                name: namespace.name.clone(),
                source: e,
            })?;
        tracing::debug!(
            "namespace {} created on the destination registry",
            namespace.name
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
