//! Depth-first reachability and the connectivity check.

use std::collections::HashSet;

use crate::types::{EdgeKind, GraphError, GraphResult, VertexKey, WeightedEdge};

use super::Graph;

/// All vertices reachable from `start` (including `start`), depth-first.
pub fn depth_first<V: VertexKey, E: WeightedEdge>(
    graph: &Graph<V, E>,
    start: &V,
) -> GraphResult<HashSet<V>> {
    if !graph.has_vertex(start) {
        return Err(GraphError::InvalidVertex(format!("{start:?}")));
    }

    let mut visited: HashSet<V> = HashSet::with_capacity(graph.vertex_count());
    let mut stack: Vec<&V> = vec![start];

    while let Some(current) = stack.pop() {
        if !visited.insert(current.clone()) {
            continue;
        }
        for next in graph.successors(current)? {
            if !visited.contains(next) {
                stack.push(next);
            }
        }
    }

    Ok(visited)
}

/// Whether every vertex is reachable from every other.
///
/// Only undirected graphs are checked. Directed and empty graphs always
/// report `false`.
pub fn is_connected<V: VertexKey, E: WeightedEdge>(graph: &Graph<V, E>) -> bool {
    if graph.kind() != EdgeKind::Undirected {
        return false;
    }
    let Some(start) = graph.vertices().first() else {
        return false;
    };

    match depth_first(graph, start) {
        Ok(visited) => visited.len() == graph.vertex_count(),
        Err(e) => {
            log::warn!("Connectivity check failed: {e}");
            false
        }
    }
}
