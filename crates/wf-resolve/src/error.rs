use thiserror::Error;

use wf_core::Category;

/// Why an utterance did not resolve to a destination.
///
/// All variants are recoverable: the caller reports them and keeps its
/// session state unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// No direct, synonym, or category match.
    #[error("{utterance:?} is not recognized")]
    Unresolved { utterance: String },

    /// The phrase names a category, but without a known position there is
    /// no "nearest" instance to pick.
    #[error("need a location fix to find the nearest {category}")]
    PositionRequired { category: Category },

    /// The phrase names a category, but no instance is reachable from the
    /// current position.
    #[error("no {category} is reachable from here")]
    NoReachableInstance { category: Category },
}

pub type ResolveResult<T> = Result<T, ResolveError>;
