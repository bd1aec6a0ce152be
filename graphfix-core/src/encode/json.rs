//! JSON graph documents: `{"nodes": [...], "edges": [...]}`.
//!
//! Node objects are keyed by `name` when the generator gave the node a display
//! name and by the numeric `id` otherwise, followed by `x`, `y` and `color`
//! when present. Edge objects carry `source`, `target` and, when tracked,
//! `weight`.

use std::io::Write;

use serde::{Serialize, Serializer, ser::SerializeStruct};
use tracing::{info, instrument};

use super::{OutputSink, with_output};
use crate::{
    error::EncodeError,
    graph::{Edge, Graph, Node},
};

#[derive(Serialize)]
struct JsonNode<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<[f64; 4]>,
}

impl<'a> From<&'a Node> for JsonNode<'a> {
    fn from(node: &'a Node) -> Self {
        let name = node.name();
        let position = node.position();
        Self {
            id: name.is_none().then(|| node.id().get()),
            name,
            x: position.map(|p| p.x),
            y: position.map(|p| p.y),
            color: node.color().map(|color| color.channels()),
        }
    }
}

#[derive(Serialize)]
struct JsonEdge {
    source: u64,
    target: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<f64>,
}

impl From<&Edge> for JsonEdge {
    fn from(edge: &Edge) -> Self {
        Self {
            source: edge.source().get(),
            target: edge.target().get(),
            weight: edge.weight(),
        }
    }
}

struct Nodes<'a>(&'a [Node]);

impl Serialize for Nodes<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(JsonNode::from))
    }
}

struct Edges<'a>(&'a [Edge]);

impl Serialize for Edges<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(JsonEdge::from))
    }
}

struct Document<'a>(&'a Graph);

impl Serialize for Document<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut document = serializer.serialize_struct("Graph", 2)?;
        document.serialize_field("nodes", &Nodes(self.0.nodes()))?;
        document.serialize_field("edges", &Edges(self.0.edges()))?;
        document.end()
    }
}

/// Writes graphs as a single JSON object.
///
/// # Examples
/// ```
/// use graphfix_core::{Edge, Graph, JsonGraphEncoder, Node, NodeId, Position};
///
/// let mut graph = Graph::new();
/// graph.push_node(Node::named(NodeId::new(0)).with_position(Position::new(0.5, 0.25)));
/// graph.push_edge(Edge::new(NodeId::new(0), NodeId::new(0)));
///
/// let mut out = Vec::new();
/// JsonGraphEncoder::new().write(&graph, &mut out)?;
/// assert_eq!(
///     String::from_utf8(out).expect("JSON is UTF-8"),
///     r#"{"nodes":[{"name":"0","x":0.5,"y":0.25}],"edges":[{"source":0,"target":0}]}"#,
/// );
/// # Ok::<(), graphfix_core::EncodeError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonGraphEncoder {
    pretty: bool,
}

impl JsonGraphEncoder {
    /// Creates an encoder producing compact JSON.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches to two-space indented output.
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Validates `graph` and writes it to `writer`.
    ///
    /// # Errors
    /// Returns [`EncodeError::Graph`] for a structurally invalid graph and
    /// [`EncodeError::Json`] when serialization or the underlying write fails.
    pub fn write<W: Write + ?Sized>(
        &self,
        graph: &Graph,
        writer: &mut W,
    ) -> Result<(), EncodeError> {
        graph.validate()?;
        self.write_document(graph, writer, "graph")
    }

    /// Validates `graph` and writes it to `name` on `sink`.
    ///
    /// # Errors
    /// Returns [`EncodeError`] when validation, serialization or I/O fails.
    #[instrument(
        name = "encode.json",
        err,
        skip(self, graph, sink),
        fields(nodes = graph.node_count(), edges = graph.edge_count(), pretty = self.pretty),
    )]
    pub fn encode<S: OutputSink + ?Sized>(
        &self,
        graph: &Graph,
        sink: &mut S,
        name: &str,
    ) -> Result<(), EncodeError> {
        graph.validate()?;
        with_output(sink, name, |writer| self.write_document(graph, writer, name))?;
        info!(file = name, "json graph written");
        Ok(())
    }

    fn write_document<W: Write + ?Sized>(
        &self,
        graph: &Graph,
        writer: &mut W,
        name: &str,
    ) -> Result<(), EncodeError> {
        let document = Document(graph);
        let result = if self.pretty {
            serde_json::to_writer_pretty(writer, &document)
        } else {
            serde_json::to_writer(writer, &document)
        };
        result.map_err(|source| EncodeError::Json {
            name: name.to_owned(),
            source,
        })
    }
}
