//! Phase 1 tests: graph container, builder and connectivity.

use network_analyzer::graph::{depth_first, is_connected, Graph, GraphBuilder};
use network_analyzer::types::{Edge, EdgeKind, GraphError, Vertex};

fn v(id: &str) -> Vertex {
    Vertex::new(id)
}

// ==================== Container ====================

#[test]
fn test_insertion_order_is_kept() {
    let mut b = GraphBuilder::directed();
    b.vertex("z").edge("b", "a", 1.0).edge("a", "z", 2.0);
    let g = b.build().unwrap();

    assert_eq!(g.vertices(), &[v("z"), v("b"), v("a")]);
    let ids: Vec<&str> = g.edges().map(Edge::id).collect();
    assert_eq!(ids, vec!["0", "1"]);
}

#[test]
fn test_undirected_edge_is_out_edge_of_both_ends() {
    let mut b = GraphBuilder::undirected();
    b.edge("a", "b", 1.0).edge("c", "c", 0.0);
    let g = b.build().unwrap();

    assert_eq!(g.out_edges(&v("a")).unwrap().count(), 1);
    assert_eq!(g.out_edges(&v("b")).unwrap().count(), 1);
    // self-loop listed once
    assert_eq!(g.out_edges(&v("c")).unwrap().count(), 1);

    let e = g.edges().next().unwrap();
    assert_eq!(g.opposite(e, &v("a")).unwrap(), &v("b"));
    assert_eq!(g.opposite(e, &v("b")).unwrap(), &v("a"));
}

#[test]
fn test_directed_edge_is_out_edge_of_source_only() {
    let mut b = GraphBuilder::directed();
    b.edge("a", "b", 1.0);
    let g = b.build().unwrap();

    assert_eq!(g.out_edges(&v("a")).unwrap().count(), 1);
    assert_eq!(g.out_edges(&v("b")).unwrap().count(), 0);
    assert_eq!(g.successors(&v("a")).unwrap(), vec![&v("b")]);
}

#[test]
fn test_container_errors() {
    let mut g: Graph<Vertex, Edge> = Graph::new(EdgeKind::Directed);
    g.add_vertex(v("a")).unwrap();
    g.add_vertex(v("b")).unwrap();
    g.add_vertex(v("c")).unwrap();

    assert!(matches!(
        g.add_vertex(v("a")),
        Err(GraphError::DuplicateVertex(_))
    ));
    assert!(matches!(
        g.add_edge(Edge::new("0", 1.0), &v("a"), &v("q")),
        Err(GraphError::VertexNotFound(_))
    ));
    assert!(matches!(
        g.add_edge(Edge::new("0", -1.0), &v("a"), &v("b")),
        Err(GraphError::InvalidWeight(_))
    ));
    assert!(matches!(
        g.add_edge(Edge::new("0", f64::NAN), &v("a"), &v("b")),
        Err(GraphError::InvalidWeight(_))
    ));

    g.add_edge(Edge::new("0", 1.0), &v("a"), &v("b")).unwrap();
    assert!(matches!(
        g.add_edge(Edge::new("0", 3.0), &v("b"), &v("a")),
        Err(GraphError::DuplicateEdge(_))
    ));

    let stray = Edge::new("9", 1.0);
    assert!(matches!(
        g.endpoints(&stray),
        Err(GraphError::EdgeNotFound(_))
    ));
    let e = Edge::new("0", 1.0);
    assert!(matches!(
        g.opposite(&e, &v("c")),
        Err(GraphError::InvalidArgument(_))
    ));
}

#[test]
fn test_builder_rejects_bad_weight() {
    let mut b = GraphBuilder::undirected();
    b.edge("a", "b", f64::INFINITY);
    assert!(matches!(b.build(), Err(GraphError::InvalidWeight(_))));
}

// ==================== Connectivity ====================

#[test]
fn test_connected_undirected_graph() {
    let mut b = GraphBuilder::undirected();
    b.edge("a", "b", 1.0).edge("b", "c", 1.0).edge("d", "c", 1.0);
    assert!(is_connected(&b.build().unwrap()));
}

#[test]
fn test_disconnected_undirected_graph() {
    let mut b = GraphBuilder::undirected();
    b.edge("a", "b", 1.0).edge("c", "d", 1.0);
    let g = b.build().unwrap();

    assert!(!is_connected(&g));
    let reached = depth_first(&g, &v("c")).unwrap();
    assert_eq!(reached.len(), 2);
    assert!(reached.contains(&v("d")));
}

#[test]
fn test_directed_graph_never_reported_connected() {
    let mut b = GraphBuilder::directed();
    b.edge("a", "b", 1.0).edge("b", "a", 1.0);
    assert!(!is_connected(&b.build().unwrap()));
}

#[test]
fn test_empty_graph_not_connected() {
    let g: Graph<Vertex, Edge> = Graph::new(EdgeKind::Undirected);
    assert!(!is_connected(&g));
}

#[test]
fn test_single_vertex_is_connected() {
    let mut b = GraphBuilder::undirected();
    b.vertex("only");
    assert!(is_connected(&b.build().unwrap()));
}

#[test]
fn test_depth_first_unknown_start() {
    let g = GraphBuilder::undirected().build().unwrap();
    assert!(matches!(
        depth_first(&g, &v("a")),
        Err(GraphError::InvalidVertex(_))
    ));
}
