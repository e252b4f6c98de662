//! Step planning: which nodes of a path get announced, and how.
//!
//! ```text
//!   path:   S ──► a ──► b ──► c ──► D
//!           │     │     │     │     └─ always announced (destination)
//!           │     └─────┴─────┴─ announced if a landmark or not straight
//!           └─ never announced (the walker is already there)
//! ```

use wf_core::{NodeId, NodeKind};
use wf_spatial::LocationGraph;

use crate::direction::{turn_direction, Direction};

/// One instruction tied to a single node along a route.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NarrationStep {
    pub target:    NodeId,
    pub direction: Direction,
    pub text:      String,
}

/// Plan the announcements for `path`.
///
/// Paths shorter than two nodes have nothing to narrate.  The destination
/// step carries [`Direction::Straight`]: there is no outgoing edge to turn
/// onto.
pub fn plan_steps(graph: &LocationGraph, path: &[NodeId]) -> Vec<NarrationStep> {
    let Some(last) = path.len().checked_sub(1) else {
        return Vec::new();
    };
    let mut steps = Vec::new();

    for i in 1..=last {
        let node = path[i];
        if i == last {
            steps.push(NarrationStep {
                target:    node,
                direction: Direction::Straight,
                text:      destination_text(graph, node),
            });
            break;
        }

        let direction = turn_direction(
            graph.pos(path[i - 1]),
            graph.pos(node),
            graph.pos(path[i + 1]),
        );
        let landmark = graph.category(node).is_some_and(|c| c.is_landmark());
        if landmark || !direction.is_straight() {
            steps.push(NarrationStep { target: node, direction, text: interior_text(graph, node, direction) });
        }
    }
    steps
}

/// Closing announcement once the last step has been delivered.
pub fn arrival_text(graph: &LocationGraph, destination: NodeId) -> String {
    match graph.kind(destination) {
        NodeKind::Location => format!("You have arrived at {}", graph.name(destination)),
        NodeKind::Waypoint => "You have arrived at your destination".to_owned(),
    }
}

fn interior_text(graph: &LocationGraph, node: NodeId, direction: Direction) -> String {
    match (graph.kind(node), direction) {
        (NodeKind::Waypoint, d)                  => d.label().to_owned(),
        (NodeKind::Location, Direction::Straight) => format!("Go straight past {}", graph.name(node)),
        (NodeKind::Location, d)                  => format!("{} at {}", d.label(), graph.name(node)),
    }
}

fn destination_text(graph: &LocationGraph, node: NodeId) -> String {
    match graph.kind(node) {
        NodeKind::Location => format!("Continue to {}", graph.name(node)),
        NodeKind::Waypoint => "Continue to your destination".to_owned(),
    }
}
