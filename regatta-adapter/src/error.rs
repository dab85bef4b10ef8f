//! Error type for adapter implementations.

use thiserror::Error;

/// All errors an adapter can report to the flow.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The requested namespace does not exist on the registry.
    #[error("namespace {name} not found")]
    NamespaceNotFound { name: String },

    /// A backend-specific failure (network, auth, malformed response).
    #[error("{0}")]
    Backend(String),
}

impl AdapterError {
    /// Convenience constructor for backend failures.
    pub fn backend(message: impl Into<String>) -> Self {
        AdapterError::Backend(message.into())
    }
}
