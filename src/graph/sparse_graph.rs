//! Adjacency-list graph keyed by caller-supplied vertex and edge handles.

use std::collections::HashMap;

use crate::types::{EdgeKind, GraphError, GraphResult, VertexKey, WeightedEdge};

#[derive(Debug, Clone)]
struct EdgeSlot<E> {
    edge: E,
    source: usize,
    target: usize,
}

/// Sparse weighted graph. Read-only once handed to the shortest-path engine.
///
/// Vertices and edges iterate in insertion order, which makes traversal
/// settlement order (and therefore tie-breaking) reproducible for a given input.
#[derive(Debug, Clone)]
pub struct Graph<V, E> {
    kind: EdgeKind,
    /// All vertices, in insertion order.
    vertices: Vec<V>,
    /// Vertex -> position in `vertices`.
    vertex_index: HashMap<V, usize>,
    /// Vertex position -> slots in `edges` leaving that vertex.
    adjacency: Vec<Vec<usize>>,
    /// All edges with their endpoint positions, in insertion order.
    edges: Vec<EdgeSlot<E>>,
    /// Edge -> slot in `edges`.
    edge_index: HashMap<E, usize>,
}

impl<V: VertexKey, E: WeightedEdge> Graph<V, E> {
    /// Create a new empty graph.
    pub fn new(kind: EdgeKind) -> Self {
        Self::with_capacity(kind, 0, 0)
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(kind: EdgeKind, vertex_count: usize, edge_count: usize) -> Self {
        Self {
            kind,
            vertices: Vec::with_capacity(vertex_count),
            vertex_index: HashMap::with_capacity(vertex_count),
            adjacency: Vec::with_capacity(vertex_count),
            edges: Vec::with_capacity(edge_count),
            edge_index: HashMap::with_capacity(edge_count),
        }
    }

    /// Directed or undirected.
    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All vertices, in insertion order.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &E> + '_ {
        self.edges.iter().map(|slot| &slot.edge)
    }

    pub fn has_vertex(&self, v: &V) -> bool {
        self.vertex_index.contains_key(v)
    }

    pub fn has_edge(&self, e: &E) -> bool {
        self.edge_index.contains_key(e)
    }

    /// Add a vertex with no edges.
    pub fn add_vertex(&mut self, v: V) -> GraphResult<()> {
        if self.has_vertex(&v) {
            return Err(GraphError::DuplicateVertex(format!("{v:?}")));
        }
        self.vertex_index.insert(v.clone(), self.vertices.len());
        self.vertices.push(v);
        self.adjacency.push(Vec::new());
        Ok(())
    }

    /// Add an edge between two existing vertices.
    ///
    /// For undirected graphs the edge is an out-edge of both endpoints; a
    /// self-loop is listed once.
    pub fn add_edge(&mut self, e: E, v1: &V, v2: &V) -> GraphResult<()> {
        let weight = e.weight();
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight(weight));
        }

        let source = self.position(v1)?;
        let target = self.position(v2)?;

        if self.has_edge(&e) {
            return Err(GraphError::DuplicateEdge(format!("{e:?}")));
        }

        let slot = self.edges.len();
        self.edge_index.insert(e.clone(), slot);
        self.edges.push(EdgeSlot {
            edge: e,
            source,
            target,
        });

        self.adjacency[source].push(slot);
        if self.kind == EdgeKind::Undirected && source != target {
            self.adjacency[target].push(slot);
        }

        Ok(())
    }

    /// The `(source, target)` pair an edge was added with.
    pub fn endpoints(&self, e: &E) -> GraphResult<(&V, &V)> {
        let slot = self.slot(e)?;
        Ok((&self.vertices[slot.source], &self.vertices[slot.target]))
    }

    /// The endpoint of `e` that is not `v` (or `v` itself for a self-loop).
    pub fn opposite(&self, e: &E, v: &V) -> GraphResult<&V> {
        let slot = self.slot(e)?;
        let at = self.position(v)?;

        if slot.source == at {
            Ok(&self.vertices[slot.target])
        } else if slot.target == at {
            Ok(&self.vertices[slot.source])
        } else {
            Err(GraphError::InvalidArgument(format!(
                "{e:?} does not connect {v:?}"
            )))
        }
    }

    /// Edges leaving `v`, in insertion order.
    pub fn out_edges(&self, v: &V) -> GraphResult<impl Iterator<Item = &E> + '_> {
        let at = self.position(v)?;
        Ok(self.adjacency[at]
            .iter()
            .map(move |&slot| &self.edges[slot].edge))
    }

    /// Distinct vertices reachable over one out-edge of `v`.
    pub fn successors(&self, v: &V) -> GraphResult<Vec<&V>> {
        let at = self.position(v)?;
        let mut seen = vec![false; self.vertices.len()];
        let mut result = Vec::new();

        for &slot in &self.adjacency[at] {
            let slot = &self.edges[slot];
            let next = if slot.source == at {
                slot.target
            } else {
                slot.source
            };
            if !seen[next] {
                seen[next] = true;
                result.push(&self.vertices[next]);
            }
        }

        Ok(result)
    }

    fn position(&self, v: &V) -> GraphResult<usize> {
        self.vertex_index
            .get(v)
            .copied()
            .ok_or_else(|| GraphError::VertexNotFound(format!("{v:?}")))
    }

    fn slot(&self, e: &E) -> GraphResult<&EdgeSlot<E>> {
        self.edge_index
            .get(e)
            .map(|&slot| &self.edges[slot])
            .ok_or_else(|| GraphError::EdgeNotFound(format!("{e:?}")))
    }
}
