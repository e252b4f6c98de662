//! Session values passed into and out of [`Wayfinder::handle`](crate::Wayfinder::handle).

use std::fmt;

use wf_core::{NodeId, RouteId};
use wf_resolve::{MatchKind, ResolveError};

/// Everything a session remembers between events.
///
/// Node ids refer to the graph of the [`Wayfinder`](crate::Wayfinder) that
/// produced the state; [`Wayfinder::reload`](crate::Wayfinder::reload)
/// translates them to the new graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Last accepted location fix.
    pub position:    Option<NodeId>,
    /// Resolved destination not yet reached.
    pub destination: Option<NodeId>,
    /// Route currently being narrated.
    pub route:       Option<RouteId>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// External input to the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// A scanned location marker.
    LocationFix(String),
    /// Raw speech-to-text output.
    Utterance(String),
    /// Manually entered destination.
    Destination(String),
}

/// Something the engine wants the user to know.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    PositionFixed { node: NodeId, id: String },
    /// The marker names no node; the position is unchanged.
    PositionUnknown { id: String },
    ResolvedDestination { node: NodeId, id: String, key: String, matched: MatchKind },
    /// `key` is the normalized form of what was said.
    ResolutionFailed { key: String, reason: ResolveError },
    RouteComputed { route: RouteId, path: Vec<NodeId>, distance: f64, summary: String },
    RouteUnavailable { from: String, to: String },
    Arrived { node: NodeId, id: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::PositionFixed { id, .. }       => write!(f, "You are at {id}"),
            Notice::PositionUnknown { id }         => write!(f, "Unknown location marker {id:?}"),
            Notice::ResolvedDestination { id, .. } => write!(f, "Navigating to {id}"),
            Notice::ResolutionFailed { reason, .. } => write!(f, "{reason}"),
            Notice::RouteComputed { summary, .. }  => f.write_str(summary),
            Notice::RouteUnavailable { from, to }  => write!(f, "No path found from {from} to {to}"),
            Notice::Arrived { id, .. }             => write!(f, "You have arrived at {id}"),
        }
    }
}

/// Result of handling one event.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub state:   SessionState,
    pub notices: Vec<Notice>,
}
