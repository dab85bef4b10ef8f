//! Domain types for the Regatta replication engine.
//!
//! Identity values use newtypes; never bare `i64`/`String` for execution,
//! task or job identifiers. All types are serializable via serde.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed identifier for a replication run. Many tasks belong
/// to one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionId(pub i64);

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for ExecutionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A strongly-typed identifier for a durable task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for TaskId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A strongly-typed identifier for a submitted background job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// The product type of a registry (e.g. `"harbor"`, `"docker-hub"`).
/// Adapter factories are keyed by this value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistryType(pub String);

impl fmt::Display for RegistryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RegistryType {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RegistryType {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Access credential for a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_key: String,
    pub access_secret: String,
}

/// An artifact registry endpoint, source or destination of a replication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RegistryType,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<Credential>,
    #[serde(default)]
    pub insecure: bool,
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// The kind of a discoverable artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// A container image repository.
    Repository,
    /// A chart (e.g. Helm) repository entry.
    Chart,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceType::Repository => write!(f, "repository"),
            ResourceType::Chart => write!(f, "chart"),
        }
    }
}

impl FromStr for ResourceType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "repository" => Ok(ResourceType::Repository),
            "chart" => Ok(ResourceType::Chart),
            other => Err(ModelError::UnknownResourceType {
                value: other.to_owned(),
            }),
        }
    }
}

/// Identity of a discoverable artifact: full name, owning namespace and
/// the ordered list of version tags ("vtags").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMetadata {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub vtags: Vec<String>,
}

/// One discoverable artifact unit on a registry.
///
/// `metadata` is optional because adapters may return partially described
/// artifacts; filtering and naming tolerate its absence. A source-side
/// resource and its computed destination-side resource pair one-to-one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: ResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ResourceMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<Registry>,
    /// Backend-specific info carried through to the job runner untouched.
    #[serde(default)]
    pub extended_info: BTreeMap<String, serde_json::Value>,
    /// Marks a removal to propagate rather than a copy.
    #[serde(default)]
    pub deleted: bool,
    /// Overwrite an existing destination artifact.
    #[serde(default)]
    pub overwrite: bool,
}

/// A grouping container on a registry that must exist before artifacts
/// can be placed inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// Human-readable name of a resource for task records.
///
/// Format: the bare name when the resource has no vtags, otherwise
/// `name:[tag1,tag2,...]` with the tags joined in their current order.
/// A resource without metadata yields the empty string.
pub fn resource_name(res: &Resource) -> String {
    let meta = match &res.metadata {
        Some(meta) => meta,
        None => return String::new(),
    };
    if meta.vtags.is_empty() {
        return meta.name.clone();
    }
    format!("{}:[{}]", meta.name, meta.vtags.join(","))
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Status of a durable task record.
///
/// The flow only transitions `Initialized` → `Pending` | `Failed`; the
/// remaining states are reached later by job execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Initialized,
    Pending,
    InProgress,
    Succeeded,
    Failed,
    Stopped,
}

/// What a task does with its resource pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Copy,
    Deletion,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Copy => write!(f, "copy"),
            Operation::Deletion => write!(f, "deletion"),
        }
    }
}

/// A durable task record: one transfer or deletion unit within an
/// execution. The store assigns the `TaskId` on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub execution_id: ExecutionId,
    pub status: TaskStatus,
    pub resource_type: ResourceType,
    pub src_resource: String,
    pub dst_resource: String,
    pub operation: Operation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<JobId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
