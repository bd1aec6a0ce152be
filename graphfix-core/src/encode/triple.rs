//! Tab-separated fixed-arity record files.
//!
//! One record per line, no header, no escaping. Floats use the shortest
//! representation that round-trips, so a unit size is written as `1`.

use std::io::Write;

use tracing::{Span, field, info, instrument};

use super::{OutputSink, with_output};
use crate::{
    error::EncodeError,
    graph::{Graph, Node},
};

/// Record layouts understood by the renderer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TripleKind {
    /// `id\tvalue`
    NodeValue,
    /// `id\tx\ty\tsize`
    NodeLayout,
    /// `source\ttarget\tweight`, or `source\ttarget` for unweighted edges.
    Edge,
}

impl TripleKind {
    /// Returns a short label for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NodeValue => "node_value",
            Self::NodeLayout => "node_layout",
            Self::Edge => "edge",
        }
    }
}

/// Output names for the three triple files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TripleFiles {
    /// Node-value file.
    pub values: String,
    /// Node-layout file.
    pub layout: String,
    /// Edge file.
    pub edges: String,
}

impl Default for TripleFiles {
    fn default() -> Self {
        Self {
            values: "e1.txt".to_owned(),
            layout: "l1.txt".to_owned(),
            edges: "n1.txt".to_owned(),
        }
    }
}

/// Writes graphs as tab-separated triple files.
///
/// # Examples
/// ```
/// use graphfix_core::{Edge, Graph, Node, NodeId, TripleKind, TripleTextEncoder};
///
/// let mut graph = Graph::new();
/// graph.push_node(Node::new(NodeId::new(0)).with_value(0.5));
/// graph.push_node(Node::new(NodeId::new(1)).with_value(0.25));
/// graph.push_edge(Edge::new(NodeId::new(0), NodeId::new(1)).with_weight(1.0));
///
/// let mut out = Vec::new();
/// TripleTextEncoder.write(TripleKind::Edge, &graph, &mut out)?;
/// assert_eq!(out, b"0\t1\t1\n");
/// # Ok::<(), graphfix_core::EncodeError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TripleTextEncoder;

impl TripleTextEncoder {
    /// Validates `graph` and writes every record of `kind` to `writer`,
    /// returning the number of lines written.
    ///
    /// # Errors
    /// Returns [`EncodeError::Graph`] for a structurally invalid graph,
    /// [`EncodeError::MissingAttribute`] when a node lacks the attribute the
    /// record kind needs, and [`EncodeError::Io`] when writing fails.
    pub fn write<W: Write + ?Sized>(
        &self,
        kind: TripleKind,
        graph: &Graph,
        writer: &mut W,
    ) -> Result<usize, EncodeError> {
        graph.validate()?;
        write_records(kind, graph, writer, kind.as_str())
    }

    /// Validates `graph` once and writes the value, layout and edge files to
    /// `sink`.
    ///
    /// # Errors
    /// Returns [`EncodeError`] as described for [`Self::write`]; files written
    /// before the failure are left in place.
    #[instrument(
        name = "encode.triple",
        err,
        skip_all,
        fields(nodes = graph.node_count(), edges = graph.edge_count(), lines = field::Empty),
    )]
    pub fn encode<S: OutputSink + ?Sized>(
        &self,
        graph: &Graph,
        sink: &mut S,
        files: &TripleFiles,
    ) -> Result<(), EncodeError> {
        graph.validate()?;
        let mut lines = 0_usize;
        for (kind, name) in [
            (TripleKind::NodeValue, &files.values),
            (TripleKind::NodeLayout, &files.layout),
            (TripleKind::Edge, &files.edges),
        ] {
            with_output(sink, name, |writer| {
                lines += write_records(kind, graph, writer, name)?;
                Ok(())
            })?;
            info!(file = name.as_str(), kind = kind.as_str(), "triple file written");
        }
        Span::current().record("lines", lines);
        Ok(())
    }
}

fn write_records<W: Write + ?Sized>(
    kind: TripleKind,
    graph: &Graph,
    writer: &mut W,
    name: &str,
) -> Result<usize, EncodeError> {
    let io_error = |source| EncodeError::Io {
        name: name.to_owned(),
        source,
    };
    match kind {
        TripleKind::NodeValue => {
            for node in graph.nodes() {
                let value = node.value().ok_or_else(|| missing(node, "value"))?;
                writeln!(writer, "{}\t{value}", node.id()).map_err(io_error)?;
            }
            Ok(graph.node_count())
        }
        TripleKind::NodeLayout => {
            for node in graph.nodes() {
                let position = node.position().ok_or_else(|| missing(node, "position"))?;
                let size = position.size.ok_or_else(|| missing(node, "size"))?;
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{size}",
                    node.id(),
                    position.x,
                    position.y
                )
                .map_err(io_error)?;
            }
            Ok(graph.node_count())
        }
        TripleKind::Edge => {
            for edge in graph.edges() {
                match edge.weight() {
                    Some(weight) => {
                        writeln!(writer, "{}\t{}\t{weight}", edge.source(), edge.target())
                    }
                    None => writeln!(writer, "{}\t{}", edge.source(), edge.target()),
                }
                .map_err(io_error)?;
            }
            Ok(graph.edge_count())
        }
    }
}

fn missing(node: &Node, attribute: &'static str) -> EncodeError {
    EncodeError::MissingAttribute {
        node: node.id(),
        attribute,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::encode::MemorySink;
    use crate::graph::{Edge, NodeId, Position};

    fn sample_graph() -> Graph {
        let mut graph = Graph::new();
        graph.push_node(
            Node::new(NodeId::new(0))
                .with_value(0.5)
                .with_position(Position::new(0.25, 0.75).with_size(1.0)),
        );
        graph.push_node(
            Node::new(NodeId::new(1))
                .with_value(0.125)
                .with_position(Position::new(0.5, 0.0625).with_size(1.0)),
        );
        graph.push_edge(Edge::new(NodeId::new(0), NodeId::new(1)).with_weight(1.0));
        graph
    }

    #[test]
    fn encode_writes_all_three_files() -> Result<(), EncodeError> {
        let mut sink = MemorySink::new();
        TripleTextEncoder.encode(&sample_graph(), &mut sink, &TripleFiles::default())?;
        assert_eq!(sink.text("e1.txt"), Some("0\t0.5\n1\t0.125\n"));
        assert_eq!(sink.text("l1.txt"), Some("0\t0.25\t0.75\t1\n1\t0.5\t0.0625\t1\n"));
        assert_eq!(sink.text("n1.txt"), Some("0\t1\t1\n"));
        Ok(())
    }

    #[test]
    fn unweighted_edges_omit_the_weight_column() -> Result<(), EncodeError> {
        let mut graph = sample_graph();
        graph.push_edge(Edge::new(NodeId::new(1), NodeId::new(1)));
        let mut out = Vec::new();
        let lines = TripleTextEncoder.write(TripleKind::Edge, &graph, &mut out)?;
        assert_eq!(lines, 2);
        assert_eq!(out, b"0\t1\t1\n1\t1\n");
        Ok(())
    }

    #[test]
    fn missing_value_is_reported() {
        let mut graph = Graph::new();
        graph.push_node(Node::new(NodeId::new(3)));
        let err = TripleTextEncoder
            .write(TripleKind::NodeValue, &graph, &mut Vec::new())
            .expect_err("value-less node must fail");
        assert!(matches!(
            err,
            EncodeError::MissingAttribute { node, attribute: "value" } if node == NodeId::new(3)
        ));
    }

    #[test]
    fn dangling_edges_block_encoding() {
        let mut graph = sample_graph();
        graph.push_edge(Edge::new(NodeId::new(0), NodeId::new(5)));
        let mut sink = MemorySink::new();
        let err = TripleTextEncoder
            .encode(&graph, &mut sink, &TripleFiles::default())
            .expect_err("dangling edge must fail");
        assert!(matches!(err, EncodeError::Graph(_)));
        assert_eq!(sink.names().count(), 0);
    }
}
