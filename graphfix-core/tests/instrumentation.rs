#![expect(clippy::expect_used, reason = "tests require contextual panics")]
//! Verifies the spans and events emitted by generators and encoders.

use graphfix_core::{
    ClusteredConfig, InteractionImporterBuilder, InteractionRecord, MemorySink, TripleFiles,
    TripleTextEncoder, UniformConfig, generate_clustered, generate_uniform,
};
use graphfix_test_support::tracing::RecordingLayer;
use rand::{SeedableRng, rngs::SmallRng};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

#[test]
fn uniform_and_triple_spans_record_counts() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || {
        let mut rng = SmallRng::seed_from_u64(3);
        let graph = generate_uniform(&UniformConfig { node_count: 4 }, &mut rng)
            .expect("generation must succeed");
        TripleTextEncoder
            .encode(&graph, &mut MemorySink::new(), &TripleFiles::default())
            .expect("encoding must succeed");
    });

    let uniform = layer
        .span("generate.uniform")
        .expect("generate.uniform span must exist");
    assert_eq!(uniform.field("node_count"), Some("4"));

    let encode = layer
        .span("encode.triple")
        .expect("encode.triple span must exist");
    assert_eq!(encode.field("nodes"), Some("4"));
    assert_eq!(encode.field("edges"), Some("6"));
    assert_eq!(encode.field("lines"), Some("14"));
}

#[test]
fn invalid_configuration_is_logged_as_error() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let config = ClusteredConfig {
        cluster_count: 0,
        ..ClusteredConfig::default()
    };
    let result = tracing::subscriber::with_default(subscriber, || {
        generate_clustered(&config, &mut SmallRng::seed_from_u64(1))
    });
    assert!(result.is_err());

    let errors: Vec<_> = layer
        .events()
        .into_iter()
        .filter(|event| event.level == Level::ERROR)
        .collect();
    assert_eq!(errors.len(), 1);
}

#[test]
fn truncated_import_warns_and_records_fields() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let records = ["A", "B", "C", "D"].map(|target| {
        Ok::<_, std::io::Error>(InteractionRecord {
            source: "hub".to_owned(),
            target: target.to_owned(),
            weight: 1.0,
        })
    });

    let graph = tracing::subscriber::with_default(subscriber, || {
        InteractionImporterBuilder::new()
            .with_node_cap(3)
            .build()
            .expect("configuration is valid")
            .import(records, &mut SmallRng::seed_from_u64(2))
            .expect("records are infallible")
    });
    assert_eq!(graph.node_count(), 3);

    let span = layer
        .span("generate.interactions")
        .expect("generate.interactions span must exist");
    assert_eq!(span.field("records"), Some("2"));
    assert_eq!(span.field("truncated"), Some("true"));
    assert!(
        layer
            .events()
            .iter()
            .any(|event| event.level == Level::WARN && event.field("node_cap") == Some("3"))
    );
}
