//! Vertex and edge handles plus the error type.

pub mod edge;
pub mod error;
pub mod vertex;

pub use edge::{Edge, EdgeKind, WeightedEdge};
pub use error::{GraphError, GraphResult};
pub use vertex::{Vertex, VertexKey};

/// Default worker count for parallel runs.
pub const DEFAULT_THREADS: usize = 4;
