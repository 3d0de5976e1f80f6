//! CLI command implementations.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::engine::{
    Betweenness, MultiSource, ShortestPathEngine, ShortestPaths, StateMap, WorkerPool,
};
use crate::format::{FileGraph, GraphMlWriter};
use crate::graph::is_connected;
use crate::types::{Edge, GraphResult, Vertex};

/// Every result of a full run over one graph.
pub struct Analysis {
    pub graph: Arc<FileGraph>,
    pub states: StateMap<Vertex>,
    pub paths: ShortestPaths<Vertex>,
    pub betweenness: Betweenness<Vertex>,
}

/// Headline facts about an analyzed graph.
#[derive(Debug, Clone, Serialize)]
pub struct GraphSummary {
    pub vertices: usize,
    pub edges: usize,
    pub vertex_names: Vec<String>,
    pub edge_names: Vec<String>,
    pub connected: bool,
    /// Largest finite shortest distance between any two vertices.
    pub diameter: f64,
}

impl GraphSummary {
    pub fn new(graph: &FileGraph, states: &StateMap<Vertex>) -> Self {
        let diameter = states
            .values()
            .flat_map(|state| state.distances().values().copied())
            .filter(|d| d.is_finite())
            .fold(0.0, f64::max);

        Self {
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            vertex_names: graph.vertices().iter().map(Vertex::name).collect(),
            edge_names: graph.edges().map(Edge::name).collect(),
            connected: is_connected(graph),
            diameter,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PathReport {
    pub source: String,
    pub destination: String,
    pub path: Vec<String>,
    pub distance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub vertex: String,
    pub betweenness: f64,
}

#[derive(Serialize)]
struct FullReport<'a> {
    summary: &'a GraphSummary,
    paths: &'a [PathReport],
    betweenness: &'a [ScoreReport],
}

/// Run every traversal, path reconstruction and betweenness accumulation.
///
/// With `threads > 1` each phase is split into `threads` partitions on a
/// pool of that size.
pub fn analyze(graph: FileGraph, threads: usize) -> GraphResult<Analysis> {
    let graph = Arc::new(graph);
    let pool = worker_pool(threads)?;

    log::info!("Running Dijkstra on every vertex...");
    let multi = compute_states(&graph, pool.as_ref())?;
    let states = multi.states().clone();

    log::info!("Aggregating shortest paths...");
    let paths = match &pool {
        Some(pool) => ShortestPaths::compute_parallel(pool, pool.threads(), &states)?,
        None => ShortestPaths::compute(&states),
    };

    log::info!("Calculating betweenness...");
    let betweenness = match &pool {
        Some(pool) => Betweenness::compute_parallel(pool, pool.threads(), &graph, &states)?,
        None => Betweenness::compute(&graph, &states),
    };
    log::debug!("Finished aggregating shortest paths and calculating betweenness");

    Ok(Analysis {
        graph,
        states,
        paths,
        betweenness,
    })
}

/// All-pairs shortest paths and every betweenness score, optionally written
/// back out as GraphML.
pub fn cmd_all(
    graph: FileGraph,
    threads: usize,
    output: Option<&Path>,
    json: bool,
) -> GraphResult<()> {
    let analysis = analyze(graph, threads)?;
    let summary = GraphSummary::new(&analysis.graph, &analysis.states);

    let mut paths = Vec::new();
    for source in analysis.graph.vertices() {
        let (found, distances) = match (
            analysis.paths.paths_from(source),
            analysis.paths.distances_from(source),
        ) {
            (Ok(found), Ok(distances)) => (found, distances),
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("No shortest paths for {source}: {e}");
                continue;
            }
        };
        for destination in analysis.graph.vertices() {
            if let Some(path) = found.get(destination) {
                let distance = distances.get(destination).copied().unwrap_or(f64::INFINITY);
                paths.push(path_report(source, destination, path, distance));
            }
        }
    }

    let mut scores = Vec::with_capacity(analysis.graph.vertex_count());
    for v in analysis.graph.vertices() {
        match analysis.betweenness.measure(v) {
            Ok(score) => scores.push(ScoreReport {
                vertex: v.id().to_string(),
                betweenness: score,
            }),
            Err(e) => log::warn!("{e}"),
        }
    }

    if json {
        print_json(&FullReport {
            summary: &summary,
            paths: &paths,
            betweenness: &scores,
        })?;
    } else {
        log_summary(&summary);
        paths.iter().for_each(log_path);
        scores.iter().for_each(log_score);
    }

    if let Some(output) = output {
        log::info!("Writing results to {}", output.display());
        GraphMlWriter::new(&analysis.betweenness, &analysis.paths)
            .write_to_file(&analysis.graph, output)?;
    }
    Ok(())
}

/// One shortest path, from a single traversal of `source`.
pub fn cmd_shortest(
    graph: &FileGraph,
    source: &str,
    destination: &str,
    json: bool,
) -> GraphResult<()> {
    let (source, destination) = (Vertex::new(source), Vertex::new(destination));
    log::info!("Running Dijkstra on {source}...");

    let state = ShortestPathEngine::new(graph).compute(&source)?;
    let path = state.path_to(&destination)?;
    let distance = state.distance_to(&destination)?;

    let report = path_report(&source, &destination, &path, distance);
    if json {
        print_json(&report)?;
    } else {
        log_path(&report);
    }
    Ok(())
}

/// Betweenness of one vertex. Needs a traversal from every vertex.
pub fn cmd_betweenness(
    graph: FileGraph,
    vertex: &str,
    threads: usize,
    json: bool,
) -> GraphResult<()> {
    let vertex = Vertex::new(vertex);
    log::info!("Calculating betweenness measure for {vertex}...");

    let graph = Arc::new(graph);
    let pool = worker_pool(threads)?;
    let multi = compute_states(&graph, pool.as_ref())?;
    let betweenness = match &pool {
        Some(pool) => Betweenness::compute_parallel(pool, pool.threads(), &graph, multi.states())?,
        None => Betweenness::compute(&graph, multi.states()),
    };

    let report = ScoreReport {
        vertex: vertex.id().to_string(),
        betweenness: betweenness.measure(&vertex)?,
    };
    if json {
        print_json(&report)?;
    } else {
        log_score(&report);
    }
    Ok(())
}

fn worker_pool(threads: usize) -> GraphResult<Option<WorkerPool>> {
    if threads > 1 {
        Ok(Some(WorkerPool::new(threads)?))
    } else {
        Ok(None)
    }
}

fn compute_states(
    graph: &Arc<FileGraph>,
    pool: Option<&WorkerPool>,
) -> GraphResult<MultiSource<Vertex, Edge>> {
    let mut multi = MultiSource::new(Arc::clone(graph));
    match pool {
        Some(pool) => multi.compute_parallel(pool, pool.threads(), graph.vertices())?,
        None => multi.compute(graph.vertices()),
    }
    log::debug!("Finished running Dijkstra on {} sources", multi.len());
    Ok(multi)
}

fn path_report(
    source: &Vertex,
    destination: &Vertex,
    path: &[Vertex],
    distance: f64,
) -> PathReport {
    PathReport {
        source: source.id().to_string(),
        destination: destination.id().to_string(),
        path: path.iter().map(Vertex::name).collect(),
        distance,
    }
}

fn log_summary(summary: &GraphSummary) {
    log::info!("Number of vertices {}", summary.vertices);
    log::info!("Number of edges {}", summary.edges);
    log::info!("Vertices ids: {}", summary.vertex_names.join(", "));
    log::info!("Edges ids: {}", summary.edge_names.join(", "));
    if summary.connected {
        log::info!("Graph is connected");
    } else {
        log::info!("Graph is not connected");
    }
    log::info!("Diameter: {:?}", summary.diameter);
}

fn log_path(report: &PathReport) {
    log::info!(
        "Source: {} | Destination: {}\n\tPath: {}\n\tDistance: {:?}",
        report.source,
        report.destination,
        report.path.join(" --> "),
        report.distance
    );
}

fn log_score(report: &ScoreReport) {
    log::info!("{} betweenness: {:?}", report.vertex, report.betweenness);
}

fn print_json<T: Serialize>(value: &T) -> GraphResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn square_with_tail() -> FileGraph {
        let mut b = GraphBuilder::undirected();
        b.edge("A", "B", 1.0)
            .edge("B", "C", 2.0)
            .edge("C", "D", 1.0)
            .edge("D", "A", 2.0)
            .edge("D", "E", 4.0);
        b.build().unwrap()
    }

    #[test]
    fn summary_reports_finite_diameter() {
        let mut b = GraphBuilder::directed();
        b.edge("A", "B", 3.0).vertex("Z");
        let analysis = analyze(b.build().unwrap(), 1).unwrap();
        let summary = GraphSummary::new(&analysis.graph, &analysis.states);

        assert_eq!(summary.vertices, 3);
        assert_eq!(summary.edges, 1);
        assert_eq!(summary.vertex_names, vec!["nA", "nB", "nZ"]);
        assert_eq!(summary.edge_names, vec!["e0"]);
        assert!(!summary.connected);
        assert_eq!(summary.diameter, 3.0);
    }

    #[test]
    fn threaded_analysis_matches_sequential() {
        let sequential = analyze(square_with_tail(), 1).unwrap();
        let threaded = analyze(square_with_tail(), 3).unwrap();

        for v in sequential.graph.vertices() {
            let a = sequential.betweenness.measure(v).unwrap();
            let b = threaded.betweenness.measure(v).unwrap();
            assert!((a - b).abs() < 1e-9, "{v}: {a} vs {b}");

            for w in sequential.graph.vertices() {
                assert_eq!(
                    sequential.paths.distance(v, w).unwrap(),
                    threaded.paths.distance(v, w).unwrap()
                );
            }
        }
    }

    #[test]
    fn shortest_to_unreachable_vertex_fails() {
        let mut b = GraphBuilder::directed();
        b.edge("A", "B", 1.0).vertex("C");
        let graph = b.build().unwrap();

        assert!(cmd_shortest(&graph, "A", "B", false).is_ok());
        assert!(cmd_shortest(&graph, "A", "C", false).is_err());
        assert!(cmd_shortest(&graph, "Q", "B", false).is_err());
    }

    #[test]
    fn betweenness_of_unknown_vertex_fails() {
        assert!(cmd_betweenness(square_with_tail(), "D", 2, true).is_ok());
        assert!(cmd_betweenness(square_with_tail(), "Q", 2, true).is_err());
    }

    #[test]
    fn full_run_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.graphml");

        cmd_all(square_with_tail(), 2, Some(&path), false).unwrap();

        let xml = std::fs::read_to_string(&path).unwrap();
        assert!(xml.contains("<key id=\"betweenness\""));
        assert!(xml.contains("<node id=\"nE\">"));
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not representable"))
        }
    }

    #[test]
    fn json_failure_is_reported() {
        assert!(matches!(
            print_json(&Unserializable),
            Err(crate::types::GraphError::Json(_))
        ));
        assert!(print_json(&ScoreReport {
            vertex: "A".into(),
            betweenness: 1.5,
        })
        .is_ok());
    }
}
