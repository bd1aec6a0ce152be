//! Graph generators, one per input modality.

mod clustered;
mod grid;
mod interactions;
mod sampling;
mod uniform;

pub use clustered::{ClusteredConfig, DEFAULT_CLUSTER_SPREAD, generate_clustered};
pub use grid::build_pixel_grid;
pub use interactions::{
    DEFAULT_INTERACTION_THRESHOLD, DEFAULT_NODE_CAP, InteractionImporter,
    InteractionImporterBuilder, InteractionRecord,
};
pub use uniform::{UniformConfig, generate_uniform};
