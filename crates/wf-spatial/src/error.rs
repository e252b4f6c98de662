//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `wf-spatial`.
///
/// Node references are carried as the dataset's string identifiers so the
/// messages stay meaningful outside the graph that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpatialError {
    /// An edge names a node that has no coordinate.  The edge is skipped;
    /// the rest of the graph is still built.
    #[error("edge {from} – {to} skipped: no coordinate for {missing}")]
    MissingCoordinate {
        from:    String,
        to:      String,
        missing: String,
    },

    #[error("node {0} is declared more than once")]
    DuplicateNode(String),

    #[error("node {0} not found in graph")]
    NodeNotFound(String),

    #[error("no path from {from} to {to}")]
    NoPathFound { from: String, to: String },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
