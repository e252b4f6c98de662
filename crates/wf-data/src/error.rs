//! Error types for wf-data.

use thiserror::Error;

use wf_core::CoreError;
use wf_spatial::SpatialError;

/// Errors raised while loading or validating a dataset.
///
/// All of these are load-time failures; once a dataset has produced a graph,
/// nothing in this crate runs again until the next reload.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("dataset parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The dataset is structurally unusable (no nodes, or every edge refers
    /// to nodes that do not exist).
    #[error("invalid dataset: {0}")]
    Invalid(String),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type DataResult<T> = Result<T, DataError>;
