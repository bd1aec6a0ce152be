//! Uniform point-cloud generator with a complete edge set.

use rand::Rng;
use tracing::{info, instrument};

use super::sampling::{node_id, unit};
use crate::{
    error::GenerationError,
    graph::{Edge, Graph, Node, Position},
};

/// Size attached to every uniform node's layout record.
const NODE_SIZE: f64 = 1.0;
/// Weight attached to every uniform edge.
const EDGE_WEIGHT: f64 = 1.0;

/// Configuration for [`generate_uniform`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformConfig {
    /// Number of nodes to generate.
    pub node_count: usize,
}

impl Default for UniformConfig {
    fn default() -> Self {
        Self { node_count: 1031 }
    }
}

/// Generates `node_count` nodes with uniform value and position, joined by
/// every unordered pair `(i, j)` with `i < j`.
///
/// Each node draws its value, then `x`, then `y` from `[0, 1)` and carries a
/// size of 1. Edges are emitted in lexicographic order with weight 1.
///
/// A node count of zero yields an empty graph.
///
/// # Errors
/// Returns [`GenerationError::Overflow`] when the edge count does not fit in
/// `usize` or the host cannot reserve storage for the complete edge set.
///
/// # Examples
/// ```
/// use graphfix_core::{UniformConfig, generate_uniform};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let graph = generate_uniform(&UniformConfig { node_count: 4 }, &mut rng)?;
/// assert_eq!(graph.node_count(), 4);
/// assert_eq!(graph.edge_count(), 6);
/// # Ok::<(), graphfix_core::GenerationError>(())
/// ```
#[instrument(name = "generate.uniform", err, skip(rng), fields(node_count = config.node_count))]
pub fn generate_uniform<R: Rng + ?Sized>(
    config: &UniformConfig,
    rng: &mut R,
) -> Result<Graph, GenerationError> {
    let count = config.node_count;
    let edge_total = complete_edge_count(count).ok_or(GenerationError::Overflow {
        context: "complete edge count",
    })?;
    let mut graph =
        Graph::try_with_capacity(count, edge_total).map_err(|_| GenerationError::Overflow {
            context: "complete edge storage",
        })?;
    for index in 0..count {
        let value = unit(rng);
        let x = unit(rng);
        let y = unit(rng);
        graph.push_node(
            Node::new(node_id(index))
                .with_value(value)
                .with_position(Position::new(x, y).with_size(NODE_SIZE)),
        );
    }

    for source in 0..count {
        for target in (source + 1)..count {
            graph.push_edge(Edge::new(node_id(source), node_id(target)).with_weight(EDGE_WEIGHT));
        }
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "uniform graph generated"
    );
    Ok(graph)
}

/// Number of unordered pairs over `count` nodes, `None` on overflow.
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "one of `count` and `count - 1` is even, so halving is exact"
)]
fn complete_edge_count(count: usize) -> Option<usize> {
    count.checked_mul(count.saturating_sub(1)).map(|pairs| pairs / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    #[rstest]
    #[case::single(1, 0)]
    #[case::pair(2, 1)]
    #[case::small(5, 10)]
    #[case::fixture(1031, 530_965)]
    fn edge_count_is_complete(#[case] nodes: usize, #[case] edges: usize) {
        let mut rng = SmallRng::seed_from_u64(5);
        let graph = generate_uniform(&UniformConfig { node_count: nodes }, &mut rng)
            .expect("generation must succeed");
        assert_eq!(graph.node_count(), nodes);
        assert_eq!(graph.edge_count(), edges);
    }

    #[test]
    fn zero_nodes_yield_an_empty_graph() {
        let mut rng = SmallRng::seed_from_u64(5);
        let graph = generate_uniform(&UniformConfig { node_count: 0 }, &mut rng)
            .expect("an empty request must succeed");
        assert!(graph.nodes().is_empty());
        assert!(graph.edges().is_empty());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn unreservable_edge_set_reports_overflow() {
        let mut rng = SmallRng::seed_from_u64(5);
        let err = generate_uniform(&UniformConfig { node_count: 1 << 31 }, &mut rng)
            .expect_err("edge storage must not fit");
        assert_eq!(
            err,
            GenerationError::Overflow {
                context: "complete edge storage"
            }
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_edge_count_reports_overflow() {
        let mut rng = SmallRng::seed_from_u64(5);
        let err = generate_uniform(&UniformConfig { node_count: 1 << 33 }, &mut rng)
            .expect_err("edge count must overflow");
        assert_eq!(
            err,
            GenerationError::Overflow {
                context: "complete edge count"
            }
        );
    }

    #[test]
    fn edges_are_ordered_pairs_with_unit_weight() {
        let mut rng = SmallRng::seed_from_u64(9);
        let graph = generate_uniform(&UniformConfig { node_count: 4 }, &mut rng)
            .expect("generation must succeed");
        let pairs: Vec<(u64, u64)> = graph
            .edges()
            .iter()
            .map(|edge| (edge.source().get(), edge.target().get()))
            .collect();
        assert_eq!(pairs, [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        assert!(graph.edges().iter().all(|edge| edge.weight() == Some(1.0)));
    }

    #[test]
    fn attributes_are_unit_interval_with_unit_size() {
        let mut rng = SmallRng::seed_from_u64(13);
        let graph = generate_uniform(&UniformConfig { node_count: 64 }, &mut rng)
            .expect("generation must succeed");
        for node in graph.nodes() {
            let value = node.value().expect("uniform nodes carry a value");
            let position = node.position().expect("uniform nodes carry a position");
            for sample in [value, position.x, position.y] {
                assert!((0.0..1.0).contains(&sample));
            }
            assert_eq!(position.size, Some(1.0));
        }
    }
}
