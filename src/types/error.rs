//! Error types for the network analyzer.

use thiserror::Error;

/// All errors that can occur in the network analyzer.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A required argument is missing or out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A traversal was started from a vertex that is not in the graph.
    #[error("Vertex {0} does not exist in the graph")]
    InvalidVertex(String),

    /// No shortest path (or no computed state) for the requested pair.
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Vertex lookup failed.
    #[error("Vertex {0} not found")]
    VertexNotFound(String),

    /// Edge lookup failed.
    #[error("Edge {0} not found")]
    EdgeNotFound(String),

    /// Vertex inserted twice.
    #[error("Vertex {0} already exists in the graph")]
    DuplicateVertex(String),

    /// Edge inserted twice.
    #[error("Edge {0} already exists in the graph")]
    DuplicateEdge(String),

    /// Edge weight is negative or not a number.
    #[error("Edge weight must be a finite non-negative number: {0}")]
    InvalidWeight(f64),

    /// Input document is well-formed XML but carries bad graph data.
    #[error("Parse error: {0}")]
    Parse(String),

    /// XML error.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSON report could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Worker pool could not be created.
    #[error("Worker pool error: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    /// A submitted task panicked or was dropped before reporting.
    #[error("Task failed: {0}")]
    TaskFailed(String),
}

/// Convenience result type for network analyzer operations.
pub type GraphResult<T> = Result<T, GraphError>;
