use thiserror::Error;

#[derive(Debug, Error)]
pub enum NarrateError {
    /// [`RouteNarrator::start`](crate::RouteNarrator::start) was called outside
    /// a Tokio runtime.
    #[error("narration needs a Tokio runtime: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

pub type NarrateResult<T> = Result<T, NarrateError>;
