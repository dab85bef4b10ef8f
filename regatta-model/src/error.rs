//! Error types for regatta-model.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from model construction and policy loading.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse policy at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The policy YAML file did not exist at the expected path.
    #[error("policy not found at {path}")]
    PolicyNotFound { path: PathBuf },

    /// A filter declared a kind this engine does not know about.
    #[error("unsupported filter type: {kind}")]
    UnsupportedFilterType { kind: String },

    /// A resource type string did not parse as a known type.
    #[error("unknown resource type: {value}")]
    UnknownResourceType { value: String },
}
