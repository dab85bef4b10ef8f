//! The filter engine.
//!
//! A resource survives iff it satisfies every filter in list order
//! (AND); evaluation short-circuits per resource on the first failing
//! filter. Tag filters additionally narrow the surviving resource's vtag
//! set — pruning is visible to every downstream stage and is never
//! restored. The input list is consumed, so narrowing happens on owned
//! values and nothing aliases the tag collections.

use regatta_model::{Filter, Resource};

use crate::error::FlowError;
use crate::pattern::PatternMatcher;

/// Apply `filters` to `resources`, returning the survivors.
///
/// The driver hands this engine the remainder left after discovery
/// consumed the resource-type filters for enumeration selection; a
/// type filter passed directly is still honored. Label filters are
/// declared unsupported and match every resource.
pub fn filter_resources(
    resources: Vec<Resource>,
    filters: &[Filter],
    matcher: &dyn PatternMatcher,
) -> Result<Vec<Resource>, FlowError> {
    let mut kept = Vec::new();
    'resources: for mut resource in resources {
        for filter in filters {
            match filter {
                Filter::ResourceType(kind) => {
                    if *kind != resource.kind {
                        continue 'resources;
                    }
                }
                Filter::Name(pattern) => {
                    let Some(meta) = &resource.metadata else {
                        continue 'resources;
                    };
                    if !matcher.matches(pattern, &meta.name)? {
                        continue 'resources;
                    }
                }
                Filter::Tag(pattern) => {
                    let Some(meta) = &mut resource.metadata else {
                        continue 'resources;
                    };
                    let mut matched = Vec::new();
                    for vtag in &meta.vtags {
                        if matcher.matches(pattern, vtag)? {
                            matched.push(vtag.clone());
                        }
                    }
                    if matched.is_empty() {
                        continue 'resources;
                    }
                    meta.vtags = matched;
                }
                // Label filtering is not supported; pass everything through.
                Filter::Label(_) => {}
            }
        }
        kept.push(resource);
    }
    tracing::debug!("filter resources completed");
    Ok(kept)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
