//! Planar 4-connected grid built from image pixels.

use tracing::{info, instrument};

use crate::{
    error::GenerationError,
    graph::{Color, Edge, Graph, Node, NodeId},
    pixels::PixelSource,
};

fn grid_edge_count(width: usize, height: usize) -> Option<usize> {
    let horizontal = width.saturating_sub(1).checked_mul(height)?;
    let vertical = height.saturating_sub(1).checked_mul(width)?;
    horizontal.checked_add(vertical)
}

/// Builds one node per pixel and joins each to its right and bottom
/// neighbours.
///
/// Pixel `(x, y)` becomes node `y * width + x` coloured
/// `(r / 255, g / 255, b / 255, 0)`. Nodes are emitted row-major; after each
/// node its right edge (when `x < width - 1`) precedes its bottom edge (when
/// `y < height - 1`). A `W x H` source yields `W * H` nodes and
/// `(W - 1) * H + W * (H - 1)` edges. Memory grows linearly with the pixel
/// count and is not bounded here.
///
/// # Errors
/// Returns [`GenerationError::Overflow`] when the pixel or edge count does not
/// fit in `usize`, and [`GenerationError::MissingPixel`] when the source fails
/// to report an in-bounds colour.
///
/// # Examples
/// ```
/// use graphfix_core::{RgbGrid, build_pixel_grid};
///
/// let image = RgbGrid::new(2, 2, vec![[0, 0, 0]; 4]).expect("sizes agree");
/// let graph = build_pixel_grid(&image)?;
/// let pairs: Vec<(u64, u64)> = graph
///     .edges()
///     .iter()
///     .map(|edge| (edge.source().get(), edge.target().get()))
///     .collect();
/// assert_eq!(pairs, [(0, 1), (0, 2), (1, 3), (2, 3)]);
/// # Ok::<(), graphfix_core::GenerationError>(())
/// ```
#[instrument(
    name = "generate.pixel_grid",
    err,
    skip(source),
    fields(width = source.width(), height = source.height()),
)]
pub fn build_pixel_grid<P: PixelSource + ?Sized>(source: &P) -> Result<Graph, GenerationError> {
    let width = source.width();
    let height = source.height();
    let pixels = source.pixel_count().ok_or(GenerationError::Overflow {
        context: "pixel count",
    })?;
    let edge_total = grid_edge_count(width, height).ok_or(GenerationError::Overflow {
        context: "grid edge count",
    })?;

    let mut graph = Graph::with_capacity(pixels, edge_total);
    let mut id = 0_u64;
    for y in 0..height {
        for x in 0..width {
            let rgb = source
                .rgb(x, y)
                .ok_or(GenerationError::MissingPixel { x, y })?;
            let node = NodeId::new(id);
            graph.push_node(Node::new(node).with_color(Color::from_rgb8(rgb)));

            if x + 1 < width {
                graph.push_edge(Edge::new(node, NodeId::new(id + 1)));
            }
            if y + 1 < height {
                graph.push_edge(Edge::new(node, NodeId::new(id + width as u64)));
            }
            id += 1;
        }
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "pixel grid built"
    );
    Ok(graph)
}
