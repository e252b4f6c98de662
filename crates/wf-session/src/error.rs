use thiserror::Error;

use wf_core::CoreError;
use wf_data::DataError;

/// Failures building or reloading a [`Wayfinder`](crate::Wayfinder).
///
/// Per-event problems (unknown marker, unrecognized phrase, no route) are
/// not errors; they come back as [`Notice`](crate::Notice)s.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("dataset error: {0}")]
    Data(#[from] DataError),
}

pub type SessionResult<T> = Result<T, SessionError>;
