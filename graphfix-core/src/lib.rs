//! Graph fixture construction for the graphfix toolchain.
//!
//! Every generator in this crate materializes a complete [`Graph`] in memory
//! and hands it to one of the encoders, which write the interchange formats
//! consumed by the downstream renderer:
//!
//! - [`generate_uniform`] builds a uniform point cloud with a complete edge set.
//! - [`generate_clustered`] builds a cluster-biased random graph.
//! - [`build_pixel_grid`] turns a [`PixelSource`] into a 4-connected lattice.
//! - [`InteractionImporter`] filters and deduplicates a weighted edge table.
//!
//! Randomness is always drawn from a caller-supplied [`rand::Rng`], so a seeded
//! generator reproduces the same fixture byte for byte.

mod encode;
mod error;
mod generate;
mod graph;
mod index;
mod pixels;

pub use crate::{
    encode::{
        DirectorySink, JsonGraphEncoder, MemorySink, OutputSink, TripleFiles, TripleKind,
        TripleTextEncoder,
    },
    error::{EncodeError, GenerationError, GenerationErrorCode, GraphError, GraphErrorCode},
    generate::{
        ClusteredConfig, DEFAULT_CLUSTER_SPREAD, DEFAULT_INTERACTION_THRESHOLD, DEFAULT_NODE_CAP,
        InteractionImporter, InteractionImporterBuilder, InteractionRecord, UniformConfig,
        build_pixel_grid, generate_clustered, generate_uniform,
    },
    graph::{Color, Edge, Graph, Node, NodeId, Position},
    index::IdentifierIndex,
    pixels::{PixelSource, RgbGrid},
};
