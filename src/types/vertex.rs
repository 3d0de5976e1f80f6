//! Vertex handles.

use std::fmt;
use std::hash::Hash;

use serde::Serialize;

/// Anything usable as a vertex handle by the shortest-path engine.
///
/// Blanket-implemented; any cloneable, hashable, thread-safe value qualifies.
pub trait VertexKey: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> VertexKey for T where T: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// A vertex read from a GraphML file, identified by its `v_id` value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Vertex(String);

impl Vertex {
    /// Create a new vertex.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The `v_id` value.
    pub fn id(&self) -> &str {
        &self.0
    }

    /// Node name used for GraphML node ids and path strings (`n<id>`).
    pub fn name(&self) -> String {
        format!("n{}", self.0)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vertex({})", self.0)
    }
}

impl From<&str> for Vertex {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
