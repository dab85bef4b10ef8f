//! Replication policies.
//!
//! A policy names a source registry, a destination registry and the
//! filters to apply. It is the immutable input to one replication run,
//! typically loaded from a YAML document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::filter::Filter;
use crate::types::Registry;

/// Immutable description of one replication: where to read, where to
/// write, and what to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub src_registry: Registry,
    pub dst_registry: Registry,
    /// Namespaces to enumerate on the source; empty means adapter default.
    #[serde(default)]
    pub src_namespaces: Vec<String>,
    /// When set, every replicated artifact lands in this one namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst_namespace: Option<String>,
    #[serde(default)]
    pub filters: Vec<Filter>,
    /// Overwrite artifacts that already exist on the destination.
    #[serde(default, rename = "override")]
    pub overwrite: bool,
}

impl Policy {
    /// Parse a policy from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ModelError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Load a policy from a YAML file.
///
/// Returns `ModelError::PolicyNotFound` if absent,
/// `ModelError::Parse` (with path + line context) if malformed YAML.
pub fn load_policy(path: &Path) -> Result<Policy, ModelError> {
    if !path.exists() {
        return Err(ModelError::PolicyNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| ModelError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
