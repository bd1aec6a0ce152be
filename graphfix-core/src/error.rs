//! Error types for the graphfix core library.
//!
//! Generation and graph errors carry stable machine-readable codes so the CLI
//! can report them alongside the human-readable message.

use std::{fmt, io};

use thiserror::Error;

use crate::graph::NodeId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Structural violations detected by [`crate::Graph::validate`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// Two nodes share an identifier.
    #[error("node id {node} appears more than once")]
    DuplicateNode {
        /// The repeated identifier.
        node: NodeId,
    },
    /// An edge references a node that is not part of the graph.
    #[error("edge {edge} references unknown node {node}")]
    DanglingEdge {
        /// Position of the edge in the edge sequence.
        edge: usize,
        /// The missing endpoint.
        node: NodeId,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// Two nodes share an identifier.
        DuplicateNode => DuplicateNode { .. } => "GRAPH_DUPLICATE_NODE",
        /// An edge references a node that is not part of the graph.
        DanglingEdge => DanglingEdge { .. } => "GRAPH_DANGLING_EDGE",
    }
}

/// Invalid generator configuration.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GenerationError {
    /// The requested cluster count was zero.
    #[error("cluster count must be greater than zero")]
    ZeroClusters,
    /// The cluster count leaves every cluster with an empty sampling range.
    #[error("cluster count ({cluster_count}) must not exceed node budget ({node_budget})")]
    ClusterCountExceedsNodeBudget {
        /// Number of clusters requested.
        cluster_count: usize,
        /// Node budget the sampling range is derived from.
        node_budget: usize,
    },
    /// A floating-point parameter was non-finite or out of range.
    #[error("invalid floating-point parameter `{parameter}`")]
    InvalidFloatParameter {
        /// Name of the invalid parameter.
        parameter: &'static str,
    },
    /// The importer node cap was zero.
    #[error("node cap must be greater than zero")]
    ZeroNodeCap,
    /// A pixel source reported no colour for a coordinate inside its bounds.
    #[error("pixel source has no colour at ({x}, {y})")]
    MissingPixel {
        /// Column of the missing pixel.
        x: usize,
        /// Row of the missing pixel.
        y: usize,
    },
    /// A node or edge count overflowed the host integer width.
    #[error("{context} overflows the host integer width")]
    Overflow {
        /// Which quantity overflowed.
        context: &'static str,
    },
}

define_error_codes! {
    /// Stable codes describing [`GenerationError`] variants.
    enum GenerationErrorCode for GenerationError {
        /// The requested cluster count was zero.
        ZeroClusters => ZeroClusters => "GENERATION_ZERO_CLUSTERS",
        /// The cluster count leaves every cluster with an empty sampling range.
        ClusterCountExceedsNodeBudget => ClusterCountExceedsNodeBudget { .. } => "GENERATION_CLUSTERS_EXCEED_BUDGET",
        /// A floating-point parameter was non-finite or out of range.
        InvalidFloatParameter => InvalidFloatParameter { .. } => "GENERATION_INVALID_FLOAT",
        /// The importer node cap was zero.
        ZeroNodeCap => ZeroNodeCap => "GENERATION_ZERO_NODE_CAP",
        /// A pixel source reported no colour for an in-bounds coordinate.
        MissingPixel => MissingPixel { .. } => "GENERATION_MISSING_PIXEL",
        /// A node or edge count overflowed the host integer width.
        Overflow => Overflow { .. } => "GENERATION_OVERFLOW",
    }
}

/// Failures raised while serializing a graph.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The graph violated a structural invariant.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// A node lacked an attribute the record kind requires.
    #[error("node {node} has no `{attribute}` attribute")]
    MissingAttribute {
        /// Node missing the attribute.
        node: NodeId,
        /// Name of the required attribute.
        attribute: &'static str,
    },
    /// Opening or writing an output failed.
    #[error("failed to write `{name}`: {source}")]
    Io {
        /// Output name handed to the sink.
        name: String,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// JSON serialization failed.
    #[error("failed to serialize `{name}` as JSON: {source}")]
    Json {
        /// Output name handed to the sink.
        name: String,
        /// Underlying serializer error.
        #[source]
        source: serde_json::Error,
    },
}
