//! Destination resource assembly.

use regatta_model::{Registry, Resource};

/// Project each source resource onto its destination counterpart.
///
/// Pure, side-effect-free: same kind, cloned metadata, the destination
/// registry, the source's extended info and deleted flag, and the
/// policy's overwrite flag. When a destination namespace is given, the
/// *first* occurrence of the source namespace substring within the full
/// resource name is substituted with it; a name that repeats the
/// namespace string elsewhere keeps its later occurrences untouched.
pub fn assemble_destination_resources(
    resources: &[Resource],
    registry: &Registry,
    dst_namespace: Option<&str>,
    overwrite: bool,
) -> Vec<Resource> {
    let mut result = Vec::with_capacity(resources.len());
    for resource in resources {
        let mut metadata = resource.metadata.clone();
        if let (Some(meta), Some(namespace)) = (&mut metadata, dst_namespace) {
            meta.name = meta.name.replacen(&meta.namespace, namespace, 1);
            meta.namespace = namespace.to_owned();
        }
        result.push(Resource {
            kind: resource.kind,
            metadata,
            registry: Some(registry.clone()),
            extended_info: resource.extended_info.clone(),
            deleted: resource.deleted,
            overwrite,
        });
    }
    tracing::debug!("assemble the destination resources completed");
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
