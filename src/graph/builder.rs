//! Fluent API for building file-level graphs.

use std::collections::HashSet;

use crate::types::{Edge, EdgeKind, GraphResult, Vertex};

use super::Graph;

/// Fluent builder for a `Graph<Vertex, Edge>`.
///
/// Vertices are created on first mention; edges added with [`GraphBuilder::edge`]
/// get sequential ids `0, 1, 2, ...`, skipping ids already given explicitly.
pub struct GraphBuilder {
    kind: EdgeKind,
    vertices: Vec<Vertex>,
    edges: Vec<(Edge, Vertex, Vertex)>,
    edge_ids: HashSet<String>,
    next_edge_id: u64,
}

impl GraphBuilder {
    /// Create a new builder.
    pub fn new(kind: EdgeKind) -> Self {
        Self {
            kind,
            vertices: Vec::new(),
            edges: Vec::new(),
            edge_ids: HashSet::new(),
            next_edge_id: 0,
        }
    }

    /// Builder for a directed graph.
    pub fn directed() -> Self {
        Self::new(EdgeKind::Directed)
    }

    /// Builder for an undirected graph.
    pub fn undirected() -> Self {
        Self::new(EdgeKind::Undirected)
    }

    /// Add a vertex (no-op if already present).
    pub fn vertex(&mut self, id: &str) -> &mut Self {
        let vertex = Vertex::new(id);
        if !self.vertices.contains(&vertex) {
            self.vertices.push(vertex);
        }
        self
    }

    /// Add an edge with the next sequential id.
    pub fn edge(&mut self, from: &str, to: &str, weight: f64) -> &mut Self {
        let mut id = self.next_edge_id.to_string();
        while self.edge_ids.contains(&id) {
            self.next_edge_id += 1;
            id = self.next_edge_id.to_string();
        }
        self.next_edge_id += 1;
        self.edge_with_id(&id, from, to, weight)
    }

    /// Add an edge with an explicit id.
    pub fn edge_with_id(&mut self, id: &str, from: &str, to: &str, weight: f64) -> &mut Self {
        self.vertex(from);
        self.vertex(to);
        self.edge_ids.insert(id.to_string());
        self.edges
            .push((Edge::new(id, weight), Vertex::new(from), Vertex::new(to)));
        self
    }

    /// Build the final graph. Fails on duplicate edge ids or bad weights.
    pub fn build(self) -> GraphResult<Graph<Vertex, Edge>> {
        let mut graph = Graph::with_capacity(self.kind, self.vertices.len(), self.edges.len());
        for vertex in self.vertices {
            graph.add_vertex(vertex)?;
        }
        for (edge, from, to) in self.edges {
            graph.add_edge(edge, &from, &to)?;
        }
        Ok(graph)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::undirected()
    }
}
