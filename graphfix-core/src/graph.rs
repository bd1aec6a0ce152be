//! In-memory graph model shared by every generator.
//!
//! A [`Graph`] is an ordered node list plus an ordered edge sequence. Order is
//! part of the contract: encoders emit nodes and edges exactly as they were
//! pushed, so fixtures stay reproducible under a fixed seed.

use std::collections::{HashSet, TryReserveError};
use std::fmt;

use crate::error::GraphError;

/// Identifier of a node, unique within one [`Graph`].
///
/// # Examples
/// ```
/// use graphfix_core::NodeId;
///
/// let id = NodeId::new(7);
/// assert_eq!(id.get(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(u64);

impl NodeId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Layout coordinates with an optional rendering size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    /// Optional size scalar consumed by the layout file.
    pub size: Option<f64>,
}

impl Position {
    /// Creates a position without a size.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, size: None }
    }

    /// Attaches a size scalar.
    #[must_use]
    pub const fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }
}

/// Four-channel colour with every component in `[0, 1]`.
///
/// The fourth channel is reserved by the renderer and always `0.0` for colours
/// derived from pixels.
///
/// # Examples
/// ```
/// use graphfix_core::Color;
///
/// let color = Color::from_rgb8([255, 0, 51]);
/// assert_eq!(color.channels(), [1.0, 0.0, 0.2, 0.0]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color([f64; 4]);

impl Color {
    /// Normalizes an 8-bit RGB triple.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "channel normalization divides by the 8-bit maximum"
    )]
    pub fn from_rgb8([r, g, b]: [u8; 3]) -> Self {
        let scale = |channel: u8| f64::from(channel) / f64::from(u8::MAX);
        Self([scale(r), scale(g), scale(b), 0.0])
    }

    /// Returns the four channels.
    #[must_use]
    pub const fn channels(&self) -> [f64; 4] {
        self.0
    }
}

/// A graph vertex and whichever attributes its generator populated.
///
/// # Examples
/// ```
/// use graphfix_core::{Node, NodeId, Position};
///
/// let node = Node::named(NodeId::new(3)).with_position(Position::new(0.5, 0.25));
/// assert_eq!(node.name(), Some("3"));
/// assert_eq!(node.position().map(|p| p.x), Some(0.5));
/// assert!(node.color().is_none());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    id: NodeId,
    name: Option<String>,
    value: Option<f64>,
    position: Option<Position>,
    color: Option<Color>,
}

impl Node {
    /// Creates a node carrying only its identifier.
    #[must_use]
    pub const fn new(id: NodeId) -> Self {
        Self {
            id,
            name: None,
            value: None,
            position: None,
            color: None,
        }
    }

    /// Creates a node whose display name is the decimal form of `id`.
    #[must_use]
    pub fn named(id: NodeId) -> Self {
        Self {
            name: Some(id.to_string()),
            ..Self::new(id)
        }
    }

    /// Attaches a scalar value.
    #[must_use]
    pub const fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Attaches layout coordinates.
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Attaches a colour.
    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Returns the node identifier.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the scalar value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        self.value
    }

    /// Returns the layout coordinates, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    /// Returns the colour, if any.
    #[must_use]
    pub const fn color(&self) -> Option<Color> {
        self.color
    }
}

/// A connection between two node ids with an optional weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    source: NodeId,
    target: NodeId,
    weight: Option<f64>,
}

impl Edge {
    /// Creates an unweighted edge.
    #[must_use]
    pub const fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            weight: None,
        }
    }

    /// Attaches a weight.
    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Returns the source endpoint.
    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
    }

    /// Returns the target endpoint.
    #[must_use]
    pub const fn target(&self) -> NodeId {
        self.target
    }

    /// Returns the weight, if the generator tracks one.
    #[must_use]
    pub const fn weight(&self) -> Option<f64> {
        self.weight
    }
}

/// Ordered node list plus ordered edge sequence.
///
/// Duplicate and self-loop edges are permitted. Node id uniqueness and edge
/// endpoint existence are checked by [`Graph::validate`], which every encoder
/// runs before writing.
///
/// # Examples
/// ```
/// use graphfix_core::{Edge, Graph, Node, NodeId};
///
/// let mut graph = Graph::new();
/// graph.push_node(Node::new(NodeId::new(0)));
/// graph.push_node(Node::new(NodeId::new(1)));
/// graph.push_edge(Edge::new(NodeId::new(0), NodeId::new(1)));
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// assert!(graph.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with reserved storage.
    #[must_use]
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
        }
    }

    /// Creates an empty graph with reserved storage, reporting allocation
    /// failure instead of aborting.
    ///
    /// Edge storage is reserved first.
    ///
    /// # Errors
    /// Returns [`TryReserveError`] when either reservation exceeds the host
    /// capacity or the allocator refuses it.
    pub fn try_with_capacity(nodes: usize, edges: usize) -> Result<Self, TryReserveError> {
        let mut graph = Self::new();
        graph.edges.try_reserve_exact(edges)?;
        graph.nodes.try_reserve_exact(nodes)?;
        Ok(graph)
    }

    /// Appends a node.
    pub fn push_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Appends an edge.
    pub fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Returns the nodes in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Checks that node ids are unique and that every edge endpoint exists.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateNode`] for the first repeated id and
    /// [`GraphError::DanglingEdge`] for the first edge whose endpoint is not a
    /// node of this graph.
    ///
    /// # Examples
    /// ```
    /// use graphfix_core::{Edge, Graph, GraphError, Node, NodeId};
    ///
    /// let mut graph = Graph::new();
    /// graph.push_node(Node::new(NodeId::new(0)));
    /// graph.push_edge(Edge::new(NodeId::new(0), NodeId::new(9)));
    /// assert!(matches!(
    ///     graph.validate(),
    ///     Err(GraphError::DanglingEdge { edge: 0, node }) if node == NodeId::new(9)
    /// ));
    /// ```
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.id) {
                return Err(GraphError::DuplicateNode { node: node.id });
            }
        }

        for (index, edge) in self.edges.iter().enumerate() {
            for endpoint in [edge.source, edge.target] {
                if !seen.contains(&endpoint) {
                    return Err(GraphError::DanglingEdge {
                        edge: index,
                        node: endpoint,
                    });
                }
            }
        }
        Ok(())
    }
}
