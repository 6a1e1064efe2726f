//! Diagram edge model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::node::NodeId;

/// Opaque identifier of a diagram edge (e.g., "G1")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    /// Create an edge id from a raw string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Multiplicity label on an edge endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// Exactly one
    One,
    /// Zero or more
    Many,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => write!(f, "one"),
            Self::Many => write!(f, "many"),
        }
    }
}

/// A connection between two nodes
///
/// Edges are undirected in meaning; the from/to orientation only resolves
/// which cardinality label attaches to which endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique edge id
    pub id: EdgeId,
    /// First endpoint
    pub from: NodeId,
    /// Second endpoint
    pub to: NodeId,
    /// Cardinality at the `from` endpoint
    pub from_card: Cardinality,
    /// Cardinality at the `to` endpoint
    pub to_card: Cardinality,
}

impl Edge {
    /// Whether this edge has `id` as either endpoint
    #[must_use]
    pub fn touches(&self, id: &NodeId) -> bool {
        self.from == *id || self.to == *id
    }

    /// The endpoint opposite to `id`, or `None` when `id` is not an endpoint
    #[must_use]
    pub fn other_end(&self, id: &NodeId) -> Option<&NodeId> {
        if self.from == *id {
            Some(&self.to)
        } else if self.to == *id {
            Some(&self.from)
        } else {
            None
        }
    }

    /// Whether this edge connects the unordered pair `(a, b)`
    #[must_use]
    pub fn links(&self, a: &NodeId, b: &NodeId) -> bool {
        (self.from == *a && self.to == *b) || (self.from == *b && self.to == *a)
    }
}
