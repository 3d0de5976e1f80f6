//! Edge handles and the edge direction flag.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// Whether edges are followed one way or both ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Edge `(a, b)` is only an out-edge of `a`.
    Directed,
    /// Edge `(a, b)` is an out-edge of both `a` and `b`.
    Undirected,
}

impl EdgeKind {
    /// Return the GraphML `edgedefault` spelling.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Directed => "directed",
            Self::Undirected => "undirected",
        }
    }

    /// Parse a GraphML `edgedefault` value. Anything but `directed` is undirected.
    pub fn from_name(name: &str) -> Self {
        if name == "directed" {
            Self::Directed
        } else {
            Self::Undirected
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Anything usable as an edge handle by the shortest-path engine.
pub trait WeightedEdge: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Non-negative traversal cost.
    fn weight(&self) -> f64;
}

/// An edge read from a GraphML file: string id plus weight.
///
/// Two edges are the same edge when their ids match, whatever the weight.
#[derive(Debug, Clone, Serialize)]
pub struct Edge {
    id: String,
    weight: f64,
}

impl Edge {
    /// Create a new edge.
    pub fn new(id: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }

    /// The `e_id` value.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name used in logs (`e<id>`).
    pub fn name(&self) -> String {
        format!("e{}", self.id)
    }
}

impl WeightedEdge for Edge {
    fn weight(&self) -> f64 {
        self.weight
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeightedEdge({}, {})", self.id, self.weight)
    }
}
