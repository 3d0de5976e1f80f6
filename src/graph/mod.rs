//! In-memory graph storage and plain traversals.

pub mod builder;
pub mod sparse_graph;
pub mod traversal;

pub use builder::GraphBuilder;
pub use sparse_graph::Graph;
pub use traversal::{depth_first, is_connected};
