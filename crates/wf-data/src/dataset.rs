//! The logical dataset: nodes, edges, synonyms.
//!
//! Records keep string ids exactly as the source declares them; ids are only
//! resolved to `NodeId`s by [`Dataset::build_graph`].

use serde::Deserialize;
use tracing::info;

use wf_core::{Category, NodeKind, Point};
use wf_resolve::SynonymTable;
use wf_spatial::{LocationGraph, LocationGraphBuilder};

use crate::{DataError, DataResult};

#[derive(Clone, Debug, PartialEq)]
pub struct NodeRecord {
    pub id:       String,
    pub pos:      Point,
    pub kind:     NodeKind,
    pub category: Option<Category>,
}

/// Coordinates of node `id`; NaN and infinities are rejected.
pub(crate) fn node_pos(id: &str, x: f64, y: f64) -> DataResult<Point> {
    if x.is_finite() && y.is_finite() {
        Ok(Point::new(x, y))
    } else {
        Err(DataError::Parse(format!("{id}: coordinates ({x}, {y}) are not finite")))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to:   String,
}

impl EdgeRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into() }
    }
}

/// Everything the engine needs to know about one venue.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    /// In declaration order.  Order decides solver tie-breaks and which
    /// category instance wins a distance tie.
    pub nodes:    Vec<NodeRecord>,
    pub edges:    Vec<EdgeRecord>,
    pub synonyms: SynonymTable,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.kind.is_location()).count()
    }

    pub fn waypoint_count(&self) -> usize {
        self.nodes.len() - self.location_count()
    }

    /// Build the routable graph.
    ///
    /// Edges with an undefined endpoint are dropped individually (see
    /// [`LocationGraph::rejected_edges`]).  The build fails only when the
    /// dataset has no nodes, repeats a node id, or none of its edges survive.
    pub fn build_graph(&self) -> DataResult<LocationGraph> {
        if self.nodes.is_empty() {
            return Err(DataError::Invalid("dataset declares no nodes".into()));
        }

        let mut builder = LocationGraphBuilder::with_capacity(self.nodes.len(), self.edges.len());
        for node in &self.nodes {
            builder.add_node(node.id.clone(), node.pos, node.kind, node.category.clone())?;
        }
        for edge in &self.edges {
            builder.add_edge(edge.from.clone(), edge.to.clone());
        }
        let graph = builder.build();

        let rejected = graph.rejected_edges().len();
        if !self.edges.is_empty() && rejected == self.edges.len() {
            return Err(DataError::Invalid(format!(
                "all {rejected} edges reference undefined nodes"
            )));
        }

        info!(
            locations = self.location_count(),
            waypoints = self.waypoint_count(),
            edges = self.edges.len() - rejected,
            rejected,
            "location graph built"
        );
        Ok(graph)
    }
}
