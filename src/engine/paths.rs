//! Concrete shortest paths for every computed source.

use std::collections::HashMap;
use std::sync::Arc;

use crate::types::{GraphError, GraphResult, VertexKey};

use super::dijkstra::TraversalState;
use super::multi_source::StateMap;
use super::pool::{check_partitions, partition, WorkerPool};

/// Destination -> vertex sequence (source first).
pub type PathMap<V> = HashMap<V, Vec<V>>;

/// Reconstructed paths from every computed source to every vertex it reaches.
pub struct ShortestPaths<V> {
    states: StateMap<V>,
    paths: HashMap<V, PathMap<V>>,
}

impl<V: VertexKey> ShortestPaths<V> {
    /// Reconstruct all paths on the calling thread.
    pub fn compute(states: &StateMap<V>) -> Self {
        let paths = states
            .iter()
            .map(|(source, state)| (source.clone(), reconstruct_all(state)))
            .collect();

        Self {
            states: states.clone(),
            paths,
        }
    }

    /// Reconstruct all paths with the sources split over `partitions` pool tasks.
    pub fn compute_parallel(
        pool: &WorkerPool,
        partitions: usize,
        states: &StateMap<V>,
    ) -> GraphResult<Self> {
        check_partitions(partitions)?;

        let all: Vec<Arc<TraversalState<V>>> = states.values().cloned().collect();
        let mut handles = Vec::new();
        let mut start = 0;
        for chunk in partition(&all, partitions) {
            log::debug!("Shortest paths partition [{}, {})", start, start + chunk.len());
            start += chunk.len();

            handles.push(pool.submit(move || {
                chunk
                    .iter()
                    .map(|state| (state.source().clone(), reconstruct_all(state)))
                    .collect::<Vec<_>>()
            }));
        }

        let mut paths = HashMap::with_capacity(states.len());
        for handle in handles {
            paths.extend(handle.join()?);
        }

        Ok(Self {
            states: states.clone(),
            paths,
        })
    }

    /// Sources with reconstructed paths.
    pub fn sources(&self) -> impl Iterator<Item = &V> + '_ {
        self.paths.keys()
    }

    /// Every path starting at `source`.
    pub fn paths_from(&self, source: &V) -> GraphResult<&PathMap<V>> {
        self.paths.get(source).ok_or_else(|| not_computed(source))
    }

    /// Distance from `source` to every vertex (`INFINITY` if unreachable).
    pub fn distances_from(&self, source: &V) -> GraphResult<&HashMap<V, f64>> {
        self.states
            .get(source)
            .map(|state| state.distances())
            .ok_or_else(|| not_computed(source))
    }

    /// The shortest path from `source` to `destination`.
    pub fn path(&self, source: &V, destination: &V) -> GraphResult<&[V]> {
        self.paths_from(source)?
            .get(destination)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                GraphError::PathNotFound(format!("no path from {source:?} to {destination:?}"))
            })
    }

    /// The shortest distance from `source` to `destination`.
    pub fn distance(&self, source: &V, destination: &V) -> GraphResult<f64> {
        self.states
            .get(source)
            .ok_or_else(|| not_computed(source))?
            .distance_to(destination)
    }
}

fn not_computed<V: VertexKey>(source: &V) -> GraphError {
    GraphError::PathNotFound(format!("shortest paths not computed for {source:?}"))
}

fn reconstruct_all<V: VertexKey>(state: &TraversalState<V>) -> PathMap<V> {
    let mut paths = HashMap::with_capacity(state.visited().len());
    for destination in state.visited() {
        match state.path_to(destination) {
            Ok(path) => {
                paths.insert(destination.clone(), path);
            }
            Err(e) => log::warn!("Skipping destination {destination:?}: {e}"),
        }
    }
    paths
}
