//! Replication filters.
//!
//! A policy carries an ordered list of filters; a resource must satisfy
//! every one of them (AND). Each filter kind carries its value typed at
//! construction, so there is no late value-assertion failure path — the
//! only place an unknown filter kind can appear is the raw `{type, value}`
//! wire shape, and parsing rejects it there.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::types::ResourceType;

/// One replication filter predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FilterSpec", into = "FilterSpec")]
pub enum Filter {
    /// Restrict which artifact kinds are enumerated and replicated.
    ResourceType(ResourceType),
    /// Glob pattern over the full resource name.
    Name(String),
    /// Glob pattern over version tags; narrows the surviving tag set.
    Tag(String),
    /// Declared unsupported — matches every resource.
    Label(String),
}

impl Filter {
    /// The wire name of this filter's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Filter::ResourceType(_) => "resource",
            Filter::Name(_) => "name",
            Filter::Tag(_) => "tag",
            Filter::Label(_) => "label",
        }
    }
}

/// Raw `{type, value}` shape used in policy YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FilterSpec {
    #[serde(rename = "type")]
    kind: String,
    value: String,
}

impl TryFrom<FilterSpec> for Filter {
    type Error = ModelError;

    fn try_from(spec: FilterSpec) -> Result<Self, Self::Error> {
        match spec.kind.as_str() {
            "resource" => Ok(Filter::ResourceType(spec.value.parse()?)),
            "name" => Ok(Filter::Name(spec.value)),
            "tag" => Ok(Filter::Tag(spec.value)),
            "label" => Ok(Filter::Label(spec.value)),
            other => Err(ModelError::UnsupportedFilterType {
                kind: other.to_owned(),
            }),
        }
    }
}

impl From<Filter> for FilterSpec {
    fn from(filter: Filter) -> Self {
        let (kind, value) = match filter {
            Filter::ResourceType(t) => ("resource", t.to_string()),
            Filter::Name(v) => ("name", v),
            Filter::Tag(v) => ("tag", v),
            Filter::Label(v) => ("label", v),
        };
        FilterSpec {
            kind: kind.to_owned(),
            value,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
