//! Single-source shortest paths (Dijkstra) with path counting.
//!
//! Besides distances, the engine records every predecessor on some shortest
//! path and the number of distinct shortest paths to each vertex. Both are
//! needed by betweenness centrality; path reconstruction only uses the last
//! recorded predecessor.
//!
//! A run has two passes. The first settles vertices in distance order. The
//! second walks the settled vertices once more and counts paths over the
//! edges that lie on a shortest path. Before counting, each run of vertices
//! at the same distance is reordered so that zero-weight edges between them
//! point forward; a vertex reached at distance `d` through another vertex at
//! distance `d` is therefore counted after it, whichever was popped first.
//!
//! Ties are detected with exact `f64` equality. Two path weights that are equal
//! in exact arithmetic may differ after rounding (`0.1 + 0.2` vs `0.3`), in
//! which case only one of them is counted.
//!
//! A cycle of zero-weight edges has no forward order. It is cut at the vertex
//! settled first, so paths that enter the cycle there and go around it are
//! not counted.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap, HashMap, HashSet};

use crate::graph::Graph;
use crate::types::{GraphError, GraphResult, VertexKey, WeightedEdge};

/// Everything one shortest-path run from a single source produced.
#[derive(Debug, Clone)]
pub struct TraversalState<V> {
    source: V,
    /// Vertices reachable from the source.
    visited: HashSet<V>,
    /// Shortest distance per vertex; `f64::INFINITY` when unreachable.
    distances: HashMap<V, f64>,
    /// All immediate predecessors on some shortest path, in visit order.
    predecessors: HashMap<V, Vec<V>>,
    /// Number of distinct shortest paths per vertex.
    path_counts: HashMap<V, u64>,
    /// Non-decreasing distance; ties ordered so zero-weight edges point forward.
    visit_order: Vec<V>,
}

impl<V: VertexKey> TraversalState<V> {
    fn reset<E: WeightedEdge>(graph: &Graph<V, E>, source: &V) -> Self {
        let n = graph.vertex_count();
        let mut state = Self {
            source: source.clone(),
            visited: HashSet::with_capacity(n),
            distances: HashMap::with_capacity(n),
            predecessors: HashMap::with_capacity(n),
            path_counts: HashMap::with_capacity(n),
            visit_order: Vec::with_capacity(n),
        };

        for v in graph.vertices() {
            state.distances.insert(v.clone(), f64::INFINITY);
            state.predecessors.insert(v.clone(), Vec::new());
            state.path_counts.insert(v.clone(), 0);
        }
        state.distances.insert(source.clone(), 0.0);
        state.path_counts.insert(source.clone(), 1);

        state
    }

    /// The vertex this state was computed from.
    pub fn source(&self) -> &V {
        &self.source
    }

    /// Vertices reachable from the source.
    pub fn visited(&self) -> &HashSet<V> {
        &self.visited
    }

    pub fn is_visited(&self, v: &V) -> bool {
        self.visited.contains(v)
    }

    /// Distance to every vertex of the graph (`INFINITY` if unreachable).
    pub fn distances(&self) -> &HashMap<V, f64> {
        &self.distances
    }

    /// Distance to `v`, or `None` if `v` is not in the graph.
    pub fn distance(&self, v: &V) -> Option<f64> {
        self.distances.get(v).copied()
    }

    /// Predecessors of `v` on shortest paths, in visit order.
    pub fn predecessors(&self, v: &V) -> &[V] {
        self.predecessors.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct shortest paths from the source to `v`.
    pub fn path_count(&self, v: &V) -> u64 {
        self.path_counts.get(v).copied().unwrap_or(0)
    }

    /// Reachable vertices by non-decreasing distance. Every predecessor of a
    /// vertex comes before it.
    pub fn visit_order(&self) -> &[V] {
        &self.visit_order
    }

    /// One shortest path from the source to `dst`, source first.
    ///
    /// Where several shortest paths exist, the last predecessor is followed at
    /// every step.
    pub fn path_to(&self, dst: &V) -> GraphResult<Vec<V>> {
        if !self.visited.contains(dst) {
            return Err(GraphError::PathNotFound(format!(
                "no path from {:?} to {dst:?}",
                self.source
            )));
        }

        let mut path = Vec::new();
        let mut current = dst;
        loop {
            path.push(current.clone());
            match self.predecessors(current).last() {
                Some(previous) => current = previous,
                None => break,
            }
        }
        path.reverse();

        Ok(path)
    }

    /// Shortest distance from the source to `dst`.
    pub fn distance_to(&self, dst: &V) -> GraphResult<f64> {
        if !self.visited.contains(dst) {
            return Err(GraphError::PathNotFound(format!(
                "no path from {:?} to {dst:?}",
                self.source
            )));
        }
        Ok(self.distances.get(dst).copied().unwrap_or(f64::INFINITY))
    }

    /// Record a candidate distance to `to`. Returns true when `to` got
    /// strictly closer and must be queued.
    fn relax(&mut self, to: &V, candidate: f64) -> bool {
        let current = self.distances.get(to).copied().unwrap_or(f64::INFINITY);
        if candidate < current {
            self.distances.insert(to.clone(), candidate);
            true
        } else {
            false
        }
    }

    /// Reorder each run of equal-distance vertices in `visit_order` so that
    /// edges between them point forward.
    fn order_ties<E: WeightedEdge>(&mut self, graph: &Graph<V, E>) -> GraphResult<()> {
        let settled = std::mem::take(&mut self.visit_order);
        let mut order = Vec::with_capacity(settled.len());

        let mut start = 0;
        while start < settled.len() {
            let level = self.distance(&settled[start]);
            let mut end = start + 1;
            while end < settled.len() && self.distance(&settled[end]) == level {
                end += 1;
            }
            self.order_level(graph, &settled[start..end], &mut order)?;
            start = end;
        }

        self.visit_order = order;
        Ok(())
    }

    /// Topological order of one distance level. Ready vertices are taken in
    /// settlement order; a zero-weight cycle is cut at its earliest vertex.
    fn order_level<E: WeightedEdge>(
        &self,
        graph: &Graph<V, E>,
        level: &[V],
        order: &mut Vec<V>,
    ) -> GraphResult<()> {
        if level.len() == 1 {
            order.extend_from_slice(level);
            return Ok(());
        }

        let index: HashMap<&V, usize> = level.iter().enumerate().map(|(i, v)| (v, i)).collect();
        let mut next: Vec<Vec<usize>> = vec![Vec::new(); level.len()];
        let mut pending = vec![0usize; level.len()];

        for (i, u) in level.iter().enumerate() {
            let base = self.distance(u).unwrap_or(f64::INFINITY);
            for edge in graph.out_edges(u)? {
                let Ok(w) = graph.opposite(edge, u) else {
                    continue;
                };
                match index.get(w) {
                    Some(&j) if j != i && base + edge.weight() == base => {
                        next[i].push(j);
                        pending[j] += 1;
                    }
                    _ => {}
                }
            }
        }

        let mut ready: BTreeSet<usize> = (0..level.len()).filter(|&i| pending[i] == 0).collect();
        let mut placed = vec![false; level.len()];
        for _ in 0..level.len() {
            let Some(i) = ready
                .pop_first()
                .or_else(|| (0..level.len()).find(|&i| !placed[i]))
            else {
                break;
            };
            placed[i] = true;
            order.push(level[i].clone());

            for &j in &next[i] {
                pending[j] = pending[j].saturating_sub(1);
                if pending[j] == 0 && !placed[j] {
                    ready.insert(j);
                }
            }
        }

        Ok(())
    }

    /// Count shortest paths and collect predecessors along `visit_order`.
    /// Only edges pointing forward in the order are followed.
    fn count_paths<E: WeightedEdge>(&mut self, graph: &Graph<V, E>) -> GraphResult<()> {
        let position: HashMap<&V, usize> = self
            .visit_order
            .iter()
            .enumerate()
            .map(|(i, v)| (v, i))
            .collect();

        for (i, u) in self.visit_order.iter().enumerate() {
            let base = self.distances.get(u).copied().unwrap_or(f64::INFINITY);
            let through = self.path_counts.get(u).copied().unwrap_or(0);

            for edge in graph.out_edges(u)? {
                let dst = match graph.opposite(edge, u) {
                    Ok(dst) => dst,
                    Err(e) => {
                        log::warn!("Skipping edge {edge:?}: {e}");
                        continue;
                    }
                };
                if !matches!(position.get(dst), Some(&j) if j > i) {
                    continue;
                }
                let reached = self.distances.get(dst).copied().unwrap_or(f64::INFINITY);
                if base + edge.weight() != reached {
                    continue;
                }

                let count = self.path_counts.entry(dst.clone()).or_insert(0);
                *count = count.saturating_add(through);
                self.predecessors
                    .entry(dst.clone())
                    .or_default()
                    .push(u.clone());
            }
        }

        Ok(())
    }
}

/// Min-heap entry; equal distances pop in insertion order.
struct QueueEntry<V> {
    distance: f64,
    seq: u64,
    vertex: V,
}

impl<V> PartialEq for QueueEntry<V> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<V> Eq for QueueEntry<V> {}

impl<V> Ord for QueueEntry<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<V> PartialOrd for QueueEntry<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Runs Dijkstra over a borrowed graph. Holds no per-run state: every call
/// to [`ShortestPathEngine::compute`] starts from a fresh [`TraversalState`].
pub struct ShortestPathEngine<'g, V, E> {
    graph: &'g Graph<V, E>,
}

impl<'g, V: VertexKey, E: WeightedEdge> ShortestPathEngine<'g, V, E> {
    pub fn new(graph: &'g Graph<V, E>) -> Self {
        Self { graph }
    }

    /// Shortest paths from `source` to every reachable vertex.
    pub fn compute(&self, source: &V) -> GraphResult<TraversalState<V>> {
        if !self.graph.has_vertex(source) {
            return Err(GraphError::InvalidVertex(format!("{source:?}")));
        }

        let mut state = TraversalState::reset(self.graph, source);
        let mut queue = BinaryHeap::new();
        let mut seq = 0u64;
        queue.push(QueueEntry {
            distance: 0.0,
            seq,
            vertex: source.clone(),
        });

        while let Some(QueueEntry { vertex, .. }) = queue.pop() {
            // stale entry: a shorter one was popped earlier
            if state.visited.contains(&vertex) {
                continue;
            }

            state.visited.insert(vertex.clone());
            state.visit_order.push(vertex.clone());
            let base = state.distance(&vertex).unwrap_or(f64::INFINITY);

            for edge in self.graph.out_edges(&vertex)? {
                let dst = match self.graph.opposite(edge, &vertex) {
                    Ok(dst) => dst,
                    Err(e) => {
                        log::warn!("Skipping edge {edge:?}: {e}");
                        continue;
                    }
                };
                // settled vertices are final
                if state.visited.contains(dst) {
                    continue;
                }

                let candidate = base + edge.weight();
                if state.relax(dst, candidate) {
                    seq += 1;
                    queue.push(QueueEntry {
                        distance: candidate,
                        seq,
                        vertex: dst.clone(),
                    });
                }
            }
        }

        state.order_ties(self.graph)?;
        state.count_paths(self.graph)?;

        Ok(state)
    }
}
