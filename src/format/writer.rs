//! Writes graphs plus computed results as GraphML.

use std::io::Write;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::engine::{Betweenness, ShortestPaths};
use crate::types::{GraphResult, Vertex, WeightedEdge};

use super::{
    FileGraph, KEY_BETWEENNESS, KEY_EDGE_ID, KEY_EDGE_WEIGHT, KEY_SHORTEST_PATHS, KEY_VERTEX_ID,
};

const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Writer for GraphML files annotated with betweenness and shortest paths.
pub struct GraphMlWriter<'a> {
    betweenness: &'a Betweenness<Vertex>,
    paths: &'a ShortestPaths<Vertex>,
}

impl<'a> GraphMlWriter<'a> {
    /// Create a writer over computed results.
    pub fn new(betweenness: &'a Betweenness<Vertex>, paths: &'a ShortestPaths<Vertex>) -> Self {
        Self { betweenness, paths }
    }

    /// Write `graph` and its results to a file.
    pub fn write_to_file(&self, graph: &FileGraph, path: &Path) -> GraphResult<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_to(graph, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write `graph` and its results to any writer.
    pub fn write_to(&self, graph: &FileGraph, writer: &mut impl Write) -> GraphResult<()> {
        let mut xml = Writer::new_with_indent(writer, b'\t', 1);

        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        start(
            &mut xml,
            "graphml",
            &[("xmlns", GRAPHML_NS), ("xmlns:xsi", XSI_NS)],
        )?;

        write_keys(&mut xml)?;

        start(
            &mut xml,
            "graph",
            &[("id", "G"), ("edgedefault", graph.kind().name())],
        )?;
        for vertex in graph.vertices() {
            self.write_vertex(&mut xml, graph, vertex)?;
        }
        for edge in graph.edges() {
            let (from, to) = graph.endpoints(edge)?;
            let (source, target) = (from.name(), to.name());
            start(
                &mut xml,
                "edge",
                &[("source", source.as_str()), ("target", target.as_str())],
            )?;
            data(&mut xml, KEY_EDGE_ID, edge.id())?;
            data(&mut xml, KEY_EDGE_WEIGHT, &number(edge.weight()))?;
            end(&mut xml, "edge")?;
        }
        end(&mut xml, "graph")?;

        end(&mut xml, "graphml")?;
        Ok(())
    }

    fn write_vertex<W: Write>(
        &self,
        xml: &mut Writer<W>,
        graph: &FileGraph,
        vertex: &Vertex,
    ) -> GraphResult<()> {
        let name = vertex.name();
        start(xml, "node", &[("id", name.as_str())])?;
        data(xml, KEY_VERTEX_ID, vertex.id())?;

        match self.betweenness.measure(vertex) {
            Ok(score) => data(xml, KEY_BETWEENNESS, &number(score))?,
            Err(e) => log::warn!("No betweenness written for {vertex}: {e}"),
        }

        start(xml, "data", &[("key", KEY_SHORTEST_PATHS)])?;
        match (self.paths.paths_from(vertex), self.paths.distances_from(vertex)) {
            (Ok(paths), Ok(distances)) => {
                for target in graph.vertices() {
                    let Some(path) = paths.get(target) else {
                        continue;
                    };
                    let distance = distances.get(target).copied().unwrap_or(f64::INFINITY);
                    let names: Vec<String> = path.iter().map(Vertex::name).collect();

                    let target_name = target.name();
                    start(xml, "target", &[("v_id", target_name.as_str())])?;
                    element(xml, "path", &names.join("-"))?;
                    element(xml, "distance", &number(distance))?;
                    end(xml, "target")?;
                }
            }
            (Err(e), _) | (_, Err(e)) => log::warn!("No shortest paths written for {vertex}: {e}"),
        }
        end(xml, "data")?;

        end(xml, "node")
    }
}

fn write_keys<W: Write>(xml: &mut Writer<W>) -> GraphResult<()> {
    let keys = [
        (KEY_VERTEX_ID, "node", "id", "string"),
        (KEY_EDGE_ID, "edge", "id", "string"),
        (KEY_EDGE_WEIGHT, "edge", "weight", "double"),
        (KEY_BETWEENNESS, "node", "betweenness", "double"),
    ];
    for (id, target, name, kind) in keys {
        empty(
            xml,
            "key",
            &[
                ("id", id),
                ("for", target),
                ("attr.name", name),
                ("attr.type", kind),
            ],
        )?;
    }

    start(xml, "key", &[("id", KEY_SHORTEST_PATHS), ("for", "node")])?;
    element(xml, "desc", "All the shortest paths with this vertex as source")?;
    end(xml, "key")
}

/// `f64` in shortest round-trip form, always with a decimal point (`2.0`).
fn number(value: f64) -> String {
    format!("{value:?}")
}

fn start<W: Write>(xml: &mut Writer<W>, tag: &str, attrs: &[(&str, &str)]) -> GraphResult<()> {
    let mut el = BytesStart::new(tag);
    for &attr in attrs {
        el.push_attribute(attr);
    }
    xml.write_event(Event::Start(el))?;
    Ok(())
}

fn empty<W: Write>(xml: &mut Writer<W>, tag: &str, attrs: &[(&str, &str)]) -> GraphResult<()> {
    let mut el = BytesStart::new(tag);
    for &attr in attrs {
        el.push_attribute(attr);
    }
    xml.write_event(Event::Empty(el))?;
    Ok(())
}

fn end<W: Write>(xml: &mut Writer<W>, tag: &str) -> GraphResult<()> {
    xml.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn element<W: Write>(xml: &mut Writer<W>, tag: &str, text: &str) -> GraphResult<()> {
    start(xml, tag, &[])?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    end(xml, tag)
}

fn data<W: Write>(xml: &mut Writer<W>, key: &str, text: &str) -> GraphResult<()> {
    start(xml, "data", &[("key", key)])?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    end(xml, "data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn edges_carry_id_and_weight() {
        let mut b = GraphBuilder::directed();
        b.edge_with_id("7", "a", "b", 2.0).edge_with_id("8", "b", "a", 0.5);
        let graph = b.build().unwrap();
        let bc = Betweenness::compute(&graph, &Default::default());
        let paths = ShortestPaths::compute(&Default::default());

        let mut out = Vec::new();
        GraphMlWriter::new(&bc, &paths)
            .write_to(&graph, &mut out)
            .unwrap();
        let xml = String::from_utf8(out).unwrap();

        assert!(xml.contains("<edge source=\"na\" target=\"nb\">"));
        assert!(xml.contains("<data key=\"e_id\">7</data>"));
        assert!(xml.contains("<data key=\"e_weight\">2.0</data>"));
        assert!(xml.contains("<data key=\"e_weight\">0.5</data>"));
    }
}
