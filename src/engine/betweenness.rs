//! Betweenness centrality via Brandes' algorithm.
//!
//! # Algorithm
//!
//! Brandes (2001) for weighted graphs, run on top of the traversal states:
//!
//! 1. For each source `s`, the shortest-path engine has already recorded path
//!    counts, predecessor lists and the settlement order.
//! 2. Walk the settlement order backwards (farthest vertices first) and push
//!    each vertex's dependency onto its predecessors:
//!    `δ[v] += σ[v] / σ[w] * (1 + δ[w])`.
//! 3. Add `δ[w]` to the score of every `w ≠ s`.
//!
//! # Output
//!
//! Scores are not normalized. On undirected graphs every unordered pair is
//! counted once from each end, so reported scores are halved.
//!
//! # Parallel runs
//!
//! Each task accumulates into its own score map; the maps are summed on the
//! calling thread once all tasks are joined.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::graph::Graph;
use crate::types::{EdgeKind, GraphError, GraphResult, VertexKey, WeightedEdge};

use super::dijkstra::TraversalState;
use super::multi_source::StateMap;
use super::pool::{check_partitions, partition, WorkerPool};

/// Betweenness scores for every vertex of a graph.
pub struct Betweenness<V> {
    kind: EdgeKind,
    /// Raw accumulated score per vertex.
    scores: HashMap<V, f64>,
    /// Vertices that had a traversal state to accumulate from.
    computed: HashSet<V>,
}

impl<V: VertexKey> Betweenness<V> {
    fn reset<E: WeightedEdge>(graph: &Graph<V, E>) -> Self {
        Self {
            kind: graph.kind(),
            scores: graph.vertices().iter().map(|v| (v.clone(), 0.0)).collect(),
            computed: HashSet::with_capacity(graph.vertex_count()),
        }
    }

    /// Accumulate over every vertex's state on the calling thread.
    pub fn compute<E: WeightedEdge>(graph: &Graph<V, E>, states: &StateMap<V>) -> Self {
        let mut result = Self::reset(graph);

        for source in graph.vertices() {
            let Some(state) = states.get(source) else {
                log::warn!("No traversal state for {source:?}; skipping");
                continue;
            };
            accumulate(state, &mut result.scores);
            result.computed.insert(source.clone());
        }

        result
    }

    /// Accumulate with the vertex set split over `partitions` pool tasks.
    pub fn compute_parallel<E: WeightedEdge>(
        pool: &WorkerPool,
        partitions: usize,
        graph: &Graph<V, E>,
        states: &StateMap<V>,
    ) -> GraphResult<Self> {
        check_partitions(partitions)?;
        let mut result = Self::reset(graph);

        let mut sources: Vec<Arc<TraversalState<V>>> = Vec::with_capacity(graph.vertex_count());
        for source in graph.vertices() {
            match states.get(source) {
                Some(state) => sources.push(Arc::clone(state)),
                None => log::warn!("No traversal state for {source:?}; skipping"),
            }
        }

        let mut handles = Vec::new();
        let mut start = 0;
        for chunk in partition(&sources, partitions) {
            log::debug!("Betweenness partition [{}, {})", start, start + chunk.len());
            start += chunk.len();

            handles.push(pool.submit(move || {
                let mut partial = HashMap::new();
                for state in &chunk {
                    accumulate(state, &mut partial);
                }
                partial
            }));
        }

        for handle in handles {
            for (v, score) in handle.join()? {
                *result.scores.entry(v).or_insert(0.0) += score;
            }
        }
        for state in &sources {
            result.computed.insert(state.source().clone());
        }

        Ok(result)
    }

    /// Reported betweenness of `v` (halved for undirected graphs).
    pub fn measure(&self, v: &V) -> GraphResult<f64> {
        if !self.computed.contains(v) {
            return Err(GraphError::InvalidArgument(format!(
                "no betweenness centrality measure found for {v:?}"
            )));
        }
        let raw = self.scores.get(v).copied().unwrap_or(0.0);
        Ok(self.report(raw))
    }

    /// Reported scores for every vertex.
    pub fn scores(&self) -> HashMap<V, f64> {
        self.scores
            .iter()
            .map(|(v, &raw)| (v.clone(), self.report(raw)))
            .collect()
    }

    fn report(&self, raw: f64) -> f64 {
        match self.kind {
            EdgeKind::Undirected => raw / 2.0,
            EdgeKind::Directed => raw,
        }
    }
}

/// Backward dependency pass for one source.
fn accumulate<V: VertexKey>(state: &TraversalState<V>, scores: &mut HashMap<V, f64>) {
    let source = state.source();
    let mut dependency: HashMap<&V, f64> =
        state.distances().keys().map(|v| (v, 0.0)).collect();

    for w in state.visit_order().iter().rev() {
        let w_paths = state.path_count(w) as f64;
        let w_dependency = dependency.get(w).copied().unwrap_or(0.0);

        for v in state.predecessors(w) {
            let share = state.path_count(v) as f64 / w_paths * (1.0 + w_dependency);
            *dependency.entry(v).or_insert(0.0) += share;
        }

        if w != source {
            *scores.entry(w.clone()).or_insert(0.0) += w_dependency;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MultiSource;
    use crate::graph::GraphBuilder;
    use crate::types::{Edge, Vertex};

    fn v(id: &str) -> Vertex {
        Vertex::new(id)
    }

    fn run(graph: Graph<Vertex, Edge>) -> Betweenness<Vertex> {
        let graph = Arc::new(graph);
        let mut multi = MultiSource::new(Arc::clone(&graph));
        multi.compute(graph.vertices());
        Betweenness::compute(&graph, multi.states())
    }

    #[test]
    fn directed_chain() {
        let mut b = GraphBuilder::directed();
        b.edge("A", "B", 1.0).edge("B", "C", 1.0).edge("C", "D", 1.0);
        let bc = run(b.build().unwrap());

        assert!((bc.measure(&v("A")).unwrap() - 0.0).abs() < 1e-10);
        assert!((bc.measure(&v("B")).unwrap() - 2.0).abs() < 1e-10);
        assert!((bc.measure(&v("C")).unwrap() - 2.0).abs() < 1e-10);
        assert!((bc.measure(&v("D")).unwrap() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn directed_diamond_splits_credit() {
        let mut b = GraphBuilder::directed();
        b.edge("A", "B", 1.0)
            .edge("A", "C", 1.0)
            .edge("B", "D", 1.0)
            .edge("C", "D", 1.0);
        let bc = run(b.build().unwrap());

        assert!((bc.measure(&v("B")).unwrap() - 0.5).abs() < 1e-10);
        assert!((bc.measure(&v("C")).unwrap() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn star_center_carries_all_pairs() {
        let mut b = GraphBuilder::undirected();
        b.edge("C", "x", 1.0).edge("C", "y", 1.0).edge("C", "z", 1.0);
        let bc = run(b.build().unwrap());

        // three leaf pairs, all through C
        assert!((bc.measure(&v("C")).unwrap() - 3.0).abs() < 1e-10);
        assert!((bc.measure(&v("x")).unwrap() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn unknown_vertex_has_no_measure() {
        let mut b = GraphBuilder::undirected();
        b.edge("A", "B", 1.0);
        let bc = run(b.build().unwrap());
        assert!(matches!(
            bc.measure(&v("Q")),
            Err(GraphError::InvalidArgument(_))
        ));
    }
}
