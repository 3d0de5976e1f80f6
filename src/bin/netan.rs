//! CLI entry point for the `netan` network analyzer.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use network_analyzer::cli::{self, AnalyzerConfig};
use network_analyzer::types::DEFAULT_THREADS;

#[derive(Parser)]
#[command(
    name = "netan",
    about = "Shortest paths and betweenness centrality for GraphML networks"
)]
struct Cli {
    /// GraphML file to analyze
    input: PathBuf,

    /// Number of threads used for all-pairs shortest paths and betweenness
    #[arg(short = 'n', long, default_value_t = DEFAULT_THREADS)]
    nthreads: usize,

    /// Shortest path between the two given vertices
    #[arg(short, long, num_args = 2, value_names = ["SOURCE", "DESTINATION"])]
    shortest: Option<Vec<String>>,

    /// Betweenness centrality measure of the given vertex
    #[arg(short, long, value_name = "VERTEX")]
    betweenness: Option<String>,

    /// Compute everything and write the annotated graph to this GraphML file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: "text" (default) or "json"
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let shortest = match cli.shortest.as_deref() {
        Some([source, destination]) => Some((source.clone(), destination.clone())),
        _ => None,
    };

    let config = AnalyzerConfig {
        input: cli.input,
        threads: cli.nthreads,
        shortest,
        betweenness: cli.betweenness,
        output: cli.output,
        json: cli.format == "json",
    };

    if let Err(e) = cli::run(&config) {
        log::error!("{e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
