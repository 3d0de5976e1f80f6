//! Command layer behind the `netan` binary.

pub mod commands;

use std::path::PathBuf;

use crate::format::GraphMlReader;
use crate::types::{GraphResult, DEFAULT_THREADS};

/// Parsed command-line options.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// GraphML file to analyze.
    pub input: PathBuf,
    /// Worker threads; 1 or fewer runs everything on the calling thread.
    pub threads: usize,
    /// Single shortest path query (source id, destination id).
    pub shortest: Option<(String, String)>,
    /// Single betweenness query (vertex id).
    pub betweenness: Option<String>,
    /// GraphML file receiving the full results.
    pub output: Option<PathBuf>,
    /// Print reports as JSON instead of log lines.
    pub json: bool,
}

impl AnalyzerConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            threads: DEFAULT_THREADS,
            shortest: None,
            betweenness: None,
            output: None,
            json: false,
        }
    }

    /// Whether the options ask for all-pairs paths plus every score.
    pub fn runs_everything(&self) -> bool {
        (self.shortest.is_none() && self.betweenness.is_none()) || self.output.is_some()
    }
}

/// Read the input and dispatch to the requested commands.
///
/// Only the first graph in the file is analyzed. A file with no graph is
/// reported and is not an error.
pub fn run(config: &AnalyzerConfig) -> GraphResult<()> {
    let mut graphs = GraphMlReader::read_from_file(&config.input)?;
    if graphs.is_empty() {
        log::warn!(
            "File {} does not contain graph data",
            config.input.display()
        );
        return Ok(());
    }
    let graph = graphs.swap_remove(0);

    if config.runs_everything() {
        return commands::cmd_all(graph, config.threads, config.output.as_deref(), config.json);
    }
    if let Some((source, destination)) = &config.shortest {
        commands::cmd_shortest(&graph, source, destination, config.json)?;
    }
    if let Some(vertex) = &config.betweenness {
        commands::cmd_betweenness(graph, vertex, config.threads, config.json)?;
    }
    Ok(())
}
