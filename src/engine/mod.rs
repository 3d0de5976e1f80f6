//! Shortest-path and centrality computations.

pub mod betweenness;
pub mod dijkstra;
pub mod multi_source;
pub mod paths;
pub mod pool;

pub use betweenness::Betweenness;
pub use dijkstra::{ShortestPathEngine, TraversalState};
pub use multi_source::{MultiSource, StateBatch, StateMap};
pub use paths::{PathMap, ShortestPaths};
pub use pool::{TaskHandle, WorkerPool};
