//! GraphML file I/O.

pub mod reader;
pub mod writer;

pub use reader::GraphMlReader;
pub use writer::GraphMlWriter;

use crate::graph::Graph;
use crate::types::{Edge, Vertex};

/// The graph type read from and written to GraphML files.
pub type FileGraph = Graph<Vertex, Edge>;

/// Node data key holding the vertex id.
pub const KEY_VERTEX_ID: &str = "v_id";
/// Edge data key holding the edge id.
pub const KEY_EDGE_ID: &str = "e_id";
/// Edge data key holding the edge weight.
pub const KEY_EDGE_WEIGHT: &str = "e_weight";
/// Node data key holding the computed betweenness.
pub const KEY_BETWEENNESS: &str = "betweenness";
/// Node data key holding the computed shortest paths.
pub const KEY_SHORTEST_PATHS: &str = "shortest_paths";
