//! Weighted interaction table importer.
//!
//! External identifiers are mapped to sequential node indices in first-seen
//! order. Only interactions whose weight strictly exceeds the threshold become
//! edges, but both endpoints are registered as nodes regardless of weight.

use rand::Rng;
use tracing::{Span, field, info, instrument, warn};

use super::sampling::unit_position;
use crate::{
    error::GenerationError,
    graph::{Edge, Graph, Node},
    index::IdentifierIndex,
};

/// Default minimum weight (exclusive) for an interaction to become an edge.
pub const DEFAULT_INTERACTION_THRESHOLD: f64 = 0.75;
/// Default maximum number of nodes an import may create.
pub const DEFAULT_NODE_CAP: usize = 15_000;

/// One row of an interaction table.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionRecord {
    /// External identifier of the first interactor.
    pub source: String,
    /// External identifier of the second interactor.
    pub target: String,
    /// Interaction confidence.
    pub weight: f64,
}

/// Configures and constructs [`InteractionImporter`] instances.
///
/// # Examples
/// ```
/// use graphfix_core::InteractionImporterBuilder;
///
/// let importer = InteractionImporterBuilder::new()
///     .with_threshold(0.5)
///     .with_node_cap(100)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(importer.threshold(), 0.5);
/// assert_eq!(importer.node_cap(), 100);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct InteractionImporterBuilder {
    threshold: f64,
    node_cap: usize,
}

impl Default for InteractionImporterBuilder {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_INTERACTION_THRESHOLD,
            node_cap: DEFAULT_NODE_CAP,
        }
    }
}

impl InteractionImporterBuilder {
    /// Creates a builder populated with the default threshold and cap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the weight threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Overrides the node cap.
    #[must_use]
    pub const fn with_node_cap(mut self, node_cap: usize) -> Self {
        self.node_cap = node_cap;
        self
    }

    /// Validates the configuration and constructs the importer.
    ///
    /// # Errors
    /// Returns [`GenerationError::InvalidFloatParameter`] for a non-finite
    /// threshold and [`GenerationError::ZeroNodeCap`] for a zero cap.
    pub fn build(self) -> Result<InteractionImporter, GenerationError> {
        if !self.threshold.is_finite() {
            return Err(GenerationError::InvalidFloatParameter {
                parameter: "threshold",
            });
        }
        if self.node_cap == 0 {
            return Err(GenerationError::ZeroNodeCap);
        }
        Ok(InteractionImporter {
            threshold: self.threshold,
            node_cap: self.node_cap,
        })
    }
}

/// Builds a deduplicated, weight-filtered graph from interaction records.
#[derive(Clone, Copy, Debug)]
pub struct InteractionImporter {
    threshold: f64,
    node_cap: usize,
}

impl InteractionImporter {
    /// Returns the exclusive weight threshold.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the node cap.
    #[must_use]
    pub const fn node_cap(&self) -> usize {
        self.node_cap
    }

    /// Consumes `records` until they run out or the node cap would be exceeded.
    ///
    /// Each record registers its source then its target; a new identifier gets
    /// the next index, the decimal index as its name, and a position uniform in
    /// `[0, 1)`. The edge `(source, target)` is kept only when
    /// `weight > threshold`. The first record that would push the node count
    /// above the cap stops the import: that record and everything after it is
    /// discarded unread, so the result never holds more than `node_cap` nodes.
    ///
    /// # Errors
    /// Propagates the first error yielded by `records`; the import aborts
    /// there.
    ///
    /// # Examples
    /// ```
    /// use graphfix_core::{InteractionImporterBuilder, InteractionRecord};
    /// use rand::{SeedableRng, rngs::SmallRng};
    ///
    /// let importer = InteractionImporterBuilder::new().build().expect("defaults are valid");
    /// let records = [
    ///     InteractionRecord { source: "A".into(), target: "B".into(), weight: 0.9 },
    ///     InteractionRecord { source: "B".into(), target: "C".into(), weight: 0.5 },
    /// ];
    /// let mut rng = SmallRng::seed_from_u64(3);
    /// let graph = importer.import(records.into_iter().map(Ok::<_, std::io::Error>), &mut rng)?;
    /// assert_eq!(graph.node_count(), 3);
    /// assert_eq!(graph.edge_count(), 1);
    /// # Ok::<(), std::io::Error>(())
    /// ```
    #[instrument(
        name = "generate.interactions",
        skip_all,
        fields(
            threshold = self.threshold,
            node_cap = self.node_cap,
            records = field::Empty,
            truncated = field::Empty,
        ),
    )]
    pub fn import<I, E, R>(&self, records: I, rng: &mut R) -> Result<Graph, E>
    where
        I: IntoIterator<Item = Result<InteractionRecord, E>>,
        R: Rng + ?Sized,
    {
        let mut index: IdentifierIndex<String> = IdentifierIndex::new();
        let mut graph = Graph::new();
        let mut consumed = 0_usize;
        let mut truncated = false;

        for record in records {
            let InteractionRecord {
                source,
                target,
                weight,
            } = record?;

            let fresh = usize::from(!index.contains(source.as_str()))
                + usize::from(source != target && !index.contains(target.as_str()));
            if index.len() + fresh > self.node_cap {
                warn!(
                    node_cap = self.node_cap,
                    records = consumed,
                    "node cap reached; discarding remaining interactions"
                );
                truncated = true;
                break;
            }
            consumed += 1;

            let [from, to] = [source, target].map(|key| {
                let (node, inserted) = index.get_or_insert(key);
                if inserted {
                    graph.push_node(Node::named(node).with_position(unit_position(&mut *rng)));
                }
                node
            });
            if weight > self.threshold {
                graph.push_edge(Edge::new(from, to));
            }
        }

        let span = Span::current();
        span.record("records", consumed);
        span.record("truncated", truncated);
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "interaction graph imported"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    fn record(source: &str, target: &str, weight: f64) -> InteractionRecord {
        InteractionRecord {
            source: source.to_owned(),
            target: target.to_owned(),
            weight,
        }
    }

    fn import(importer: &InteractionImporter, records: Vec<InteractionRecord>) -> Graph {
        let mut rng = SmallRng::seed_from_u64(17);
        match importer.import(records.into_iter().map(Ok::<_, Infallible>), &mut rng) {
            Ok(graph) => graph,
            Err(never) => match never {},
        }
    }

    fn edge_pairs(graph: &Graph) -> Vec<(u64, u64)> {
        graph
            .edges()
            .iter()
            .map(|edge| (edge.source().get(), edge.target().get()))
            .collect()
    }

    fn default_importer() -> InteractionImporter {
        InteractionImporterBuilder::new()
            .build()
            .expect("defaults are valid")
    }

    #[test]
    fn assigns_indices_in_first_seen_order() {
        let graph = import(
            &default_importer(),
            vec![
                record("P1", "P2", 0.9),
                record("P3", "P1", 0.8),
                record("P2", "P3", 0.95),
            ],
        );
        let names: Vec<Option<&str>> = graph.nodes().iter().map(Node::name).collect();
        assert_eq!(names, [Some("0"), Some("1"), Some("2")]);
        assert_eq!(edge_pairs(&graph), [(0, 1), (2, 0), (1, 2)]);
    }

    #[rstest]
    #[case::below(0.5, false)]
    #[case::equal(0.75, false)]
    #[case::above(0.750_001, true)]
    fn threshold_is_strict(#[case] weight: f64, #[case] kept: bool) {
        let graph = import(&default_importer(), vec![record("A", "B", weight)]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), usize::from(kept));
    }

    #[test]
    fn self_interaction_creates_one_node() {
        let graph = import(&default_importer(), vec![record("A", "A", 1.0)]);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(edge_pairs(&graph), [(0, 0)]);
    }

    #[test]
    fn cap_discards_the_overflowing_record_and_the_rest() {
        let importer = InteractionImporterBuilder::new()
            .with_node_cap(3)
            .build()
            .expect("configuration is valid");
        let graph = import(
            &importer,
            vec![
                record("A", "B", 0.9),
                record("C", "D", 0.9),
                record("A", "B", 0.9),
            ],
        );
        assert_eq!(graph.node_count(), 2);
        assert_eq!(edge_pairs(&graph), [(0, 1)]);
    }

    #[test]
    fn cap_allows_filling_exactly() {
        let importer = InteractionImporterBuilder::new()
            .with_node_cap(3)
            .build()
            .expect("configuration is valid");
        let graph = import(
            &importer,
            vec![
                record("A", "B", 0.9),
                record("B", "C", 0.9),
                record("C", "A", 0.9),
            ],
        );
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn propagates_record_errors() {
        let importer = default_importer();
        let records = vec![
            Ok(record("A", "B", 0.9)),
            Err("bad line"),
            Ok(record("C", "D", 0.9)),
        ];
        let mut rng = SmallRng::seed_from_u64(1);
        let err = importer
            .import(records, &mut rng)
            .expect_err("record error must abort the import");
        assert_eq!(err, "bad line");
    }

    #[rstest]
    #[case::nan_threshold(
        InteractionImporterBuilder::new().with_threshold(f64::NAN),
        GenerationError::InvalidFloatParameter { parameter: "threshold" },
    )]
    #[case::zero_cap(
        InteractionImporterBuilder::new().with_node_cap(0),
        GenerationError::ZeroNodeCap,
    )]
    fn builder_rejects_invalid_configuration(
        #[case] builder: InteractionImporterBuilder,
        #[case] expected: GenerationError,
    ) {
        let err = builder.build().expect_err("configuration must be rejected");
        assert_eq!(err, expected);
    }
}
