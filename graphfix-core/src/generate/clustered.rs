//! Cluster-biased random graph with Gaussian 2D placement.
//!
//! Each cluster samples node pairs from its own slice of the index range and
//! places new nodes around a per-cluster centre. The slice width is
//! `node_budget / cluster_count`, so the trailing `node_budget % cluster_count`
//! indices are never sampled and the emitted node count is usually below the
//! budget.

use rand::Rng;
use tracing::{debug, info, instrument};

use super::sampling::gaussian;
use crate::{
    error::GenerationError,
    graph::{Edge, Graph, Node, NodeId, Position},
    index::IdentifierIndex,
};

/// Default standard deviation of the Gaussian placement.
pub const DEFAULT_CLUSTER_SPREAD: f64 = 0.025;

/// Configuration for [`generate_clustered`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusteredConfig {
    /// Nominal node budget the per-cluster sampling range is derived from.
    pub node_budget: usize,
    /// Number of clusters.
    pub cluster_count: usize,
    /// Sample count per cluster; each cluster draws twice this many edges.
    pub samples_per_cluster: usize,
    /// Standard deviation of node placement around the cluster centre.
    pub spread: f64,
}

impl Default for ClusteredConfig {
    fn default() -> Self {
        Self {
            node_budget: 5,
            cluster_count: 2,
            samples_per_cluster: 5,
            spread: DEFAULT_CLUSTER_SPREAD,
        }
    }
}

impl ClusteredConfig {
    fn validate(&self) -> Result<(), GenerationError> {
        if self.cluster_count == 0 {
            return Err(GenerationError::ZeroClusters);
        }
        if self.cluster_count > self.node_budget {
            return Err(GenerationError::ClusterCountExceedsNodeBudget {
                cluster_count: self.cluster_count,
                node_budget: self.node_budget,
            });
        }
        if !self.spread.is_finite() || self.spread < 0.0 {
            return Err(GenerationError::InvalidFloatParameter {
                parameter: "spread",
            });
        }
        Ok(())
    }
}

/// Centre of cluster `cluster` out of `clusters`.
#[expect(
    clippy::float_arithmetic,
    reason = "cluster centres are fractions of the unit square"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "cluster indices are small enough to be exact in f64"
)]
fn cluster_centre(cluster: usize, clusters: usize) -> (f64, f64) {
    let x = (cluster + 1) as f64 / (clusters + 1) as f64;
    let band = if cluster.is_multiple_of(2) { 0.0 } else { 1.0 };
    let y = (band + 0.6) / 2.0;
    (x, y)
}

/// Generates a cluster-biased graph.
///
/// For every cluster `c` the generator draws `2 * samples_per_cluster`
/// `(source, target)` pairs uniformly from
/// `[c * width, c * width + width - 1]` where
/// `width = node_budget / cluster_count`. The first sighting of an index
/// creates a named node at a Gaussian offset from the cluster centre; every
/// pair becomes an edge, self-loops and duplicates included. Node ids are the
/// sampled indices and nodes appear in first-sighting order.
///
/// # Errors
/// Returns [`GenerationError`] when the cluster count is zero or exceeds the
/// node budget, or when the spread is negative or non-finite.
///
/// # Examples
/// ```
/// use graphfix_core::{ClusteredConfig, generate_clustered};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let config = ClusteredConfig { node_budget: 10, cluster_count: 2, samples_per_cluster: 3, spread: 0.025 };
/// let mut rng = SmallRng::seed_from_u64(7);
/// let graph = generate_clustered(&config, &mut rng)?;
/// assert_eq!(graph.edge_count(), 12);
/// assert!(graph.node_count() <= 10);
/// # Ok::<(), graphfix_core::GenerationError>(())
/// ```
#[instrument(
    name = "generate.clustered",
    err,
    skip(rng),
    fields(
        node_budget = config.node_budget,
        clusters = config.cluster_count,
        samples = config.samples_per_cluster,
    ),
)]
pub fn generate_clustered<R: Rng + ?Sized>(
    config: &ClusteredConfig,
    rng: &mut R,
) -> Result<Graph, GenerationError> {
    config.validate()?;
    let draws = config
        .samples_per_cluster
        .checked_mul(2)
        .ok_or(GenerationError::Overflow {
            context: "samples per cluster",
        })?;
    let edge_total = draws
        .checked_mul(config.cluster_count)
        .ok_or(GenerationError::Overflow {
            context: "clustered edge count",
        })?;

    let width = config
        .node_budget
        .checked_div(config.cluster_count)
        .ok_or(GenerationError::ZeroClusters)?;
    let node_bound = config.node_budget.min(edge_total.saturating_mul(2));
    let mut seen = IdentifierIndex::new();
    let mut graph = Graph::with_capacity(node_bound, edge_total);

    for cluster in 0..config.cluster_count {
        let offset = cluster * width;
        let upper = offset + width - 1;
        let (centre_x, centre_y) = cluster_centre(cluster, config.cluster_count);
        debug!(cluster, offset, upper, centre_x, centre_y, "sampling cluster");

        for _ in 0..draws {
            let source = rng.gen_range(offset..=upper) as u64;
            let target = rng.gen_range(offset..=upper) as u64;
            for sampled in [source, target] {
                if seen.get_or_insert(sampled).1 {
                    let x = gaussian(rng, centre_x, config.spread);
                    let y = gaussian(rng, centre_y, config.spread);
                    graph.push_node(
                        Node::named(NodeId::new(sampled)).with_position(Position::new(x, y)),
                    );
                }
            }
            graph.push_edge(Edge::new(NodeId::new(source), NodeId::new(target)));
        }
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "clustered graph generated"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    fn config(node_budget: usize, cluster_count: usize, samples: usize) -> ClusteredConfig {
        ClusteredConfig {
            node_budget,
            cluster_count,
            samples_per_cluster: samples,
            spread: DEFAULT_CLUSTER_SPREAD,
        }
    }

    #[rstest]
    #[case::defaults(5, 2, 5)]
    #[case::wide(100, 4, 25)]
    #[case::single_cluster(7, 1, 3)]
    #[case::no_samples(10, 2, 0)]
    fn emits_two_edges_per_sample(
        #[case] budget: usize,
        #[case] clusters: usize,
        #[case] samples: usize,
    ) {
        let mut rng = SmallRng::seed_from_u64(21);
        let graph = generate_clustered(&config(budget, clusters, samples), &mut rng)
            .expect("generation must succeed");
        assert_eq!(graph.edge_count(), 2 * samples * clusters);
        assert!(graph.node_count() <= budget);
        assert_eq!(graph.validate(), Ok(()));
    }

    #[test]
    fn edges_stay_inside_their_cluster_range() {
        let mut rng = SmallRng::seed_from_u64(4);
        let graph =
            generate_clustered(&config(9, 2, 10), &mut rng).expect("generation must succeed");
        // width = 4: cluster 0 samples 0..=3, cluster 1 samples 4..=7.
        for (position, edge) in graph.edges().iter().enumerate() {
            let range = if position < 20 { 0..=3 } else { 4..=7 };
            assert!(range.contains(&edge.source().get()));
            assert!(range.contains(&edge.target().get()));
        }
        assert!(graph.nodes().iter().all(|node| node.id().get() != 8));
    }

    #[test]
    fn sparse_sampling_of_a_huge_budget_stays_small() {
        let mut rng = SmallRng::seed_from_u64(17);
        let graph = generate_clustered(&config(100_000_000_000_000_000, 2, 1), &mut rng)
            .expect("generation must succeed");
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.node_count() <= 4);
        assert_eq!(graph.validate(), Ok(()));
    }

    #[test]
    fn nodes_are_named_after_their_index() {
        let mut rng = SmallRng::seed_from_u64(8);
        let graph =
            generate_clustered(&config(6, 3, 4), &mut rng).expect("generation must succeed");
        for node in graph.nodes() {
            assert_eq!(node.name(), Some(node.id().to_string().as_str()));
            assert!(node.position().is_some());
        }
    }

    #[test]
    fn zero_spread_places_nodes_on_centres() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut cfg = config(4, 2, 2);
        cfg.spread = 0.0;
        let graph = generate_clustered(&cfg, &mut rng).expect("generation must succeed");
        for node in graph.nodes() {
            let position = node.position().expect("clustered nodes carry a position");
            let cluster = usize::try_from(node.id().get() / 2).expect("index fits usize");
            assert_eq!((position.x, position.y), cluster_centre(cluster, 2));
        }
    }

    #[rstest]
    #[case::zero_clusters(config(5, 0, 1), GenerationError::ZeroClusters)]
    #[case::too_many_clusters(
        config(3, 4, 1),
        GenerationError::ClusterCountExceedsNodeBudget { cluster_count: 4, node_budget: 3 },
    )]
    #[case::negative_spread(
        ClusteredConfig { spread: -1.0, ..config(5, 2, 1) },
        GenerationError::InvalidFloatParameter { parameter: "spread" },
    )]
    fn rejects_invalid_configuration(
        #[case] cfg: ClusteredConfig,
        #[case] expected: GenerationError,
    ) {
        let mut rng = SmallRng::seed_from_u64(1);
        let err = generate_clustered(&cfg, &mut rng).expect_err("configuration must be rejected");
        assert_eq!(err, expected);
    }
}
