//! Shortest-path states for many sources, sequentially or on a worker pool.

use std::collections::HashMap;
use std::sync::Arc;

use crate::graph::Graph;
use crate::types::{GraphResult, VertexKey, WeightedEdge};

use super::dijkstra::{ShortestPathEngine, TraversalState};
use super::pool::{check_partitions, partition, TaskHandle, WorkerPool};

/// Finished traversal states keyed by source vertex.
pub type StateMap<V> = HashMap<V, Arc<TraversalState<V>>>;

/// States computed by one partition task, waiting to be merged.
pub struct StateBatch<V> {
    states: Vec<TraversalState<V>>,
}

impl<V> StateBatch<V> {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Orchestrates one [`ShortestPathEngine`] run per source vertex.
pub struct MultiSource<V, E> {
    graph: Arc<Graph<V, E>>,
    states: StateMap<V>,
}

impl<V: VertexKey, E: WeightedEdge> MultiSource<V, E> {
    pub fn new(graph: Arc<Graph<V, E>>) -> Self {
        Self {
            graph,
            states: HashMap::new(),
        }
    }

    pub fn graph(&self) -> &Arc<Graph<V, E>> {
        &self.graph
    }

    /// All states computed so far.
    pub fn states(&self) -> &StateMap<V> {
        &self.states
    }

    /// The state for one source, if it was computed.
    pub fn state(&self, source: &V) -> Option<&Arc<TraversalState<V>>> {
        self.states.get(source)
    }

    /// Number of computed sources.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Compute states for `sources` on the calling thread.
    ///
    /// Sources that fail (e.g. not in the graph) are logged and skipped.
    pub fn compute(&mut self, sources: &[V]) {
        let batch = compute_partition(&self.graph, sources);
        self.absorb(batch);
    }

    /// Split `sources` into `partitions` contiguous chunks and queue one task
    /// per chunk. Returns without waiting; join the handles and pass each batch
    /// to [`MultiSource::absorb`].
    pub fn submit(
        &self,
        pool: &WorkerPool,
        partitions: usize,
        sources: &[V],
    ) -> GraphResult<Vec<TaskHandle<StateBatch<V>>>> {
        check_partitions(partitions)?;

        let chunks = partition(sources, partitions);
        let mut handles = Vec::with_capacity(chunks.len());
        let mut start = 0;

        for chunk in chunks {
            log::debug!("Dijkstra partition [{}, {})", start, start + chunk.len());
            start += chunk.len();

            let graph = Arc::clone(&self.graph);
            handles.push(pool.submit(move || compute_partition(&graph, &chunk)));
        }

        Ok(handles)
    }

    /// Publish the states of a finished batch.
    pub fn absorb(&mut self, batch: StateBatch<V>) {
        for state in batch.states {
            self.states.insert(state.source().clone(), Arc::new(state));
        }
    }

    /// [`MultiSource::submit`], then wait for every task and merge the results.
    pub fn compute_parallel(
        &mut self,
        pool: &WorkerPool,
        partitions: usize,
        sources: &[V],
    ) -> GraphResult<()> {
        let handles = self.submit(pool, partitions, sources)?;
        for handle in handles {
            let batch = handle.join()?;
            self.absorb(batch);
        }
        Ok(())
    }
}

fn compute_partition<V: VertexKey, E: WeightedEdge>(
    graph: &Graph<V, E>,
    sources: &[V],
) -> StateBatch<V> {
    let engine = ShortestPathEngine::new(graph);
    let mut states = Vec::with_capacity(sources.len());

    for source in sources {
        match engine.compute(source) {
            Ok(state) => states.push(state),
            Err(e) => log::warn!("Skipping source {source:?}: {e}"),
        }
    }

    log::debug!("Dijkstra finished a partition of {} sources", sources.len());
    StateBatch { states }
}
