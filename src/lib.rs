//! Network analyzer: shortest paths and betweenness centrality over weighted
//! graphs.
//!
//! A single-source Dijkstra engine records distances, predecessor lists, path
//! counts and settlement order per source. Multi-source runs fan out over a
//! worker pool; the resulting states feed path reconstruction and Brandes'
//! betweenness accumulation. Graphs are read from and written to GraphML.

pub mod cli;
pub mod engine;
pub mod format;
pub mod graph;
pub mod types;

// Re-export commonly used types at the crate root
pub use engine::{
    Betweenness, MultiSource, PathMap, ShortestPathEngine, ShortestPaths, StateMap, TaskHandle,
    TraversalState, WorkerPool,
};
pub use format::{FileGraph, GraphMlReader, GraphMlWriter};
pub use graph::{depth_first, is_connected, Graph, GraphBuilder};
pub use types::{
    Edge, EdgeKind, GraphError, GraphResult, Vertex, VertexKey, WeightedEdge, DEFAULT_THREADS,
};
