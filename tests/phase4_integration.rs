//! Phase 4 tests: end-to-end runs through the command layer.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use network_analyzer::cli::{self, AnalyzerConfig};
use network_analyzer::format::GraphMlReader;
use network_analyzer::types::{GraphError, Vertex};

const PATH_GRAPH: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <key id="v_id" for="node" attr.name="id" attr.type="string"/>
  <key id="e_id" for="edge" attr.name="id" attr.type="string"/>
  <key id="e_weight" for="edge" attr.name="weight" attr.type="double"/>
  <graph id="G" edgedefault="undirected">
    <node id="n0"><data key="v_id">0</data></node>
    <node id="n1"><data key="v_id">1</data></node>
    <node id="n2"><data key="v_id">2</data></node>
    <node id="n3"><data key="v_id">3</data></node>
    <edge source="n0" target="n1"><data key="e_id">0</data><data key="e_weight">1.0</data></edge>
    <edge source="n1" target="n2"><data key="e_id">1</data><data key="e_weight">1.0</data></edge>
    <edge source="n2" target="n3"><data key="e_id">2</data><data key="e_weight">1.0</data></edge>
  </graph>
</graphml>"#;

fn write_input(dir: &TempDir, name: &str, xml: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, xml).unwrap();
    path
}

/// Pull `<data key="betweenness">` per node id out of a written file.
fn betweenness_in(path: &Path) -> Vec<(String, f64)> {
    let xml = fs::read_to_string(path).unwrap();
    let mut found = Vec::new();
    for chunk in xml.split("<node id=\"").skip(1) {
        let name = chunk.split('"').next().unwrap().to_string();
        let score = chunk
            .split("<data key=\"betweenness\">")
            .nth(1)
            .and_then(|rest| rest.split('<').next())
            .map(|s| s.parse::<f64>().unwrap())
            .unwrap();
        found.push((name, score));
    }
    found
}

#[test]
fn test_full_run_with_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in.graphml", PATH_GRAPH);
    let output = dir.path().join("out.graphml");

    for threads in [1, 4] {
        let mut config = AnalyzerConfig::new(&input);
        config.threads = threads;
        config.output = Some(output.clone());
        cli::run(&config).unwrap();

        let scores = betweenness_in(&output);
        assert_eq!(
            scores,
            vec![
                ("n0".to_string(), 0.0),
                ("n1".to_string(), 2.0),
                ("n2".to_string(), 2.0),
                ("n3".to_string(), 0.0),
            ]
        );

        // the written file reads back as the input graph
        let graphs = GraphMlReader::read_from_file(&output).unwrap();
        assert_eq!(graphs[0].vertex_count(), 4);
        assert_eq!(graphs[0].edge_count(), 3);
        assert_eq!(graphs[0].vertices()[3], Vertex::new("3"));
    }
}

#[test]
fn test_single_queries() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in.graphml", PATH_GRAPH);

    let mut config = AnalyzerConfig::new(&input);
    config.shortest = Some(("0".into(), "3".into()));
    config.betweenness = Some("1".into());
    config.json = true;
    cli::run(&config).unwrap();

    config.threads = 1;
    config.json = false;
    cli::run(&config).unwrap();
}

#[test]
fn test_single_query_failures() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in.graphml", PATH_GRAPH);

    let mut config = AnalyzerConfig::new(&input);
    config.shortest = Some(("0".into(), "9".into()));
    assert!(matches!(
        cli::run(&config),
        Err(GraphError::PathNotFound(_))
    ));

    config.shortest = Some(("9".into(), "0".into()));
    assert!(matches!(
        cli::run(&config),
        Err(GraphError::InvalidVertex(_))
    ));

    config.shortest = None;
    config.betweenness = Some("9".into());
    assert!(matches!(
        cli::run(&config),
        Err(GraphError::InvalidArgument(_))
    ));
}

#[test]
fn test_file_without_graph_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "empty.graphml", "<graphml></graphml>");
    let output = dir.path().join("out.graphml");

    let mut config = AnalyzerConfig::new(&input);
    config.output = Some(output.clone());
    cli::run(&config).unwrap();
    assert!(!output.exists());
}

#[test]
fn test_bad_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "bad.graphml",
        r#"<graphml><graph><node id="a"><data key="v_id">a</data></node>
        <edge source="a" target="a"><data key="e_id">0</data><data key="e_weight">x</data></edge>
        </graph></graphml>"#,
    );
    assert!(matches!(
        cli::run(&AnalyzerConfig::new(&input)),
        Err(GraphError::Parse(_))
    ));
}

#[test]
fn test_unwritable_output_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in.graphml", PATH_GRAPH);

    let mut config = AnalyzerConfig::new(&input);
    config.output = Some(dir.path().join("missing").join("out.graphml"));
    assert!(matches!(cli::run(&config), Err(GraphError::Io(_))));
}
