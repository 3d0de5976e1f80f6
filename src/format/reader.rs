//! Reads GraphML documents into in-memory graphs.
//!
//! Only the base structure is read: `v_id` on nodes, `e_id` and `e_weight` on
//! edges. Computed annotations (`betweenness`, `shortest_paths`) are ignored,
//! so a file written by [`super::GraphMlWriter`] reads back as its input graph.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::graph::Graph;
use crate::types::{Edge, EdgeKind, GraphError, GraphResult, Vertex};

use super::{FileGraph, KEY_EDGE_ID, KEY_EDGE_WEIGHT, KEY_VERTEX_ID};

/// Reader for GraphML files.
pub struct GraphMlReader;

impl GraphMlReader {
    /// Read every `<graph>` in a GraphML file.
    pub fn read_from_file(path: &Path) -> GraphResult<Vec<FileGraph>> {
        let xml = std::fs::read_to_string(path)?;
        Self::read_from_str(&xml)
    }

    /// Read every `<graph>` from any reader.
    pub fn read_from(reader: &mut impl Read) -> GraphResult<Vec<FileGraph>> {
        let mut xml = String::new();
        reader.read_to_string(&mut xml)?;
        Self::read_from_str(&xml)
    }

    /// Read every `<graph>` from an in-memory document.
    pub fn read_from_str(xml: &str) -> GraphResult<Vec<FileGraph>> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut parser = Parser::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => parser.open(&e)?,
                Event::Empty(e) => {
                    parser.open(&e)?;
                    parser.close(e.local_name().as_ref())?;
                }
                Event::Text(t) => parser.text(&t.unescape()?),
                Event::CData(c) => parser.text(&String::from_utf8_lossy(&c.into_inner())),
                Event::End(e) => parser.close(e.local_name().as_ref())?,
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(parser.graphs)
    }
}

/// A `<node>` or `<edge>` whose `<data>` children are still being read.
#[derive(Default)]
struct ElementDraft {
    xml_id: String,
    source: String,
    target: String,
    data: HashMap<String, String>,
}

#[derive(Default)]
struct GraphDraft {
    kind: Option<EdgeKind>,
    /// XML node id -> vertex, plus document order of first appearance.
    vertices: HashMap<String, Vertex>,
    order: Vec<String>,
    edges: Vec<(Edge, String, String)>,
}

#[derive(Default)]
struct Parser {
    graphs: Vec<FileGraph>,
    graph: Option<GraphDraft>,
    /// Nesting depth of `<graph>` elements; inner graphs are flattened.
    graph_depth: usize,
    node: Option<ElementDraft>,
    edge: Option<ElementDraft>,
    /// Key and collected text of the `<data>` element being read, if wanted.
    data: Option<(String, String)>,
}

impl Parser {
    fn open(&mut self, e: &BytesStart<'_>) -> GraphResult<()> {
        match e.local_name().as_ref() {
            b"graph" => {
                self.graph_depth += 1;
                if self.graph_depth == 1 {
                    let kind = attribute(e, "edgedefault")?
                        .map(|value| EdgeKind::from_name(&value))
                        .unwrap_or(EdgeKind::Undirected);
                    self.graph = Some(GraphDraft {
                        kind: Some(kind),
                        ..GraphDraft::default()
                    });
                }
            }
            b"node" if self.graph.is_some() => {
                self.node = Some(ElementDraft {
                    xml_id: attribute(e, "id")?.unwrap_or_default(),
                    ..ElementDraft::default()
                });
            }
            b"edge" if self.graph.is_some() => {
                self.edge = Some(ElementDraft {
                    source: attribute(e, "source")?.unwrap_or_default(),
                    target: attribute(e, "target")?.unwrap_or_default(),
                    ..ElementDraft::default()
                });
            }
            b"data" => {
                let key = attribute(e, "key")?.unwrap_or_default();
                let wanted = if self.edge.is_some() {
                    key == KEY_EDGE_ID || key == KEY_EDGE_WEIGHT
                } else if self.node.is_some() {
                    key == KEY_VERTEX_ID
                } else {
                    false
                };
                if wanted {
                    self.data = Some((key, String::new()));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if let Some((_, buffer)) = self.data.as_mut() {
            buffer.push_str(text);
        }
    }

    fn close(&mut self, name: &[u8]) -> GraphResult<()> {
        match name {
            b"data" => {
                if let Some((key, value)) = self.data.take() {
                    let value = value.trim().to_string();
                    if let Some(edge) = self.edge.as_mut() {
                        edge.data.insert(key, value);
                    } else if let Some(node) = self.node.as_mut() {
                        node.data.insert(key, value);
                    }
                }
            }
            b"node" => {
                if let (Some(node), Some(graph)) = (self.node.take(), self.graph.as_mut()) {
                    if let Some(id) = node.data.get(KEY_VERTEX_ID) {
                        if !graph.vertices.contains_key(&node.xml_id) {
                            graph.order.push(node.xml_id.clone());
                        }
                        graph.vertices.insert(node.xml_id, Vertex::new(id.as_str()));
                    }
                }
            }
            b"edge" => {
                if let (Some(edge), Some(graph)) = (self.edge.take(), self.graph.as_mut()) {
                    if let (Some(id), Some(weight)) = (
                        edge.data.get(KEY_EDGE_ID),
                        edge.data.get(KEY_EDGE_WEIGHT),
                    ) {
                        let weight: f64 = weight.parse().map_err(|_| {
                            GraphError::Parse(format!("edge {id}: invalid weight {weight:?}"))
                        })?;
                        graph
                            .edges
                            .push((Edge::new(id.as_str(), weight), edge.source, edge.target));
                    }
                }
            }
            b"graph" => {
                self.graph_depth = self.graph_depth.saturating_sub(1);
                if self.graph_depth == 0 {
                    if let Some(draft) = self.graph.take() {
                        self.graphs.push(build(draft));
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}

fn attribute(e: &BytesStart<'_>, name: &str) -> GraphResult<Option<String>> {
    match e.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// Turn a finished draft into a graph. Duplicates and dangling edges are
/// logged and left out.
fn build(draft: GraphDraft) -> FileGraph {
    let kind = draft.kind.unwrap_or(EdgeKind::Undirected);
    let mut graph = Graph::with_capacity(kind, draft.order.len(), draft.edges.len());

    for xml_id in &draft.order {
        if let Some(vertex) = draft.vertices.get(xml_id) {
            if let Err(e) = graph.add_vertex(vertex.clone()) {
                log::warn!("Skipping node {xml_id}: {e}");
            }
        }
    }

    for (edge, source, target) in draft.edges {
        let (Some(from), Some(to)) = (draft.vertices.get(&source), draft.vertices.get(&target))
        else {
            log::warn!("Skipping {edge}: unknown endpoint {source} or {target}");
            continue;
        };
        if let Err(e) = graph.add_edge(edge, from, to) {
            log::warn!("Skipping edge: {e}");
        }
    }

    graph
}
