//! Resource discovery on the source registry.

use regatta_adapter::Adapter;
use regatta_model::{Filter, Policy, Resource, ResourceType};

use crate::error::FlowError;

/// Fetch the source resources selected by `policy`.
///
/// Resource-type filters select *which* artifact kinds to enumerate; the
/// remaining filters are handed to the adapter for server-side
/// pre-filtering where it can, and returned alongside the resources so
/// the downstream filter engine never sees the consumed type filters.
/// With no type filter present the adapter's full supported-type list is
/// enumerated — replicate everything this adapter can see.
///
/// Results concatenate in type-iteration order, each kind in the
/// adapter's own return order. Any per-type failure discards results
/// already fetched for other kinds.
pub fn fetch_resources(
    adapter: &dyn Adapter,
    policy: &Policy,
) -> Result<(Vec<Resource>, Vec<Filter>), FlowError> {
    let mut types = Vec::new();
    let mut filters = Vec::new();
    for filter in &policy.filters {
        match filter {
            Filter::ResourceType(kind) => types.push(*kind),
            other => filters.push(other.clone()),
        }
    }
    if types.is_empty() {
        let info = adapter
            .info()
            .map_err(|e| FlowError::AdapterInfo { source: e })?;
        types.extend(info.supported_resource_types);
    }

    let mut resources = Vec::new();
    for kind in types {
        let fetched = match kind {
            ResourceType::Repository => adapter
                .image_registry()
                .ok_or(FlowError::CapabilityMismatch {
                    resource_type: kind,
                })?
                .fetch_images(&policy.src_namespaces, &filters),
            ResourceType::Chart => adapter
                .chart_registry()
                .ok_or(FlowError::CapabilityMismatch {
                    resource_type: kind,
                })?
                .fetch_charts(&policy.src_namespaces, &filters),
        }
        .map_err(|e| FlowError::Discovery {
            resource_type: kind,
            source: e,
        })?;
        resources.extend(fetched);
        tracing::debug!("fetch {kind} completed");
    }

    tracing::debug!("fetch resources from the source registry completed");
    Ok((resources, filters))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
