//! Shortest-path solvers and the path-distance oracle.
//!
//! # Pluggability
//!
//! Routing and category disambiguation both go through the [`PathSolver`]
//! trait, so the session can swap the reference [`LinearScanSolver`] for the
//! heap-based [`HeapSolver`] on large maps without touching anything else.
//!
//! # Contract
//!
//! A solver returns the node sequence from source to destination, both
//! inclusive.  If the destination is unreachable (or either endpoint is not
//! in the graph) the sequence is **empty**, never a partial path.
//! `from == to` yields the one-node path `[from]`.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use wf_core::NodeId;

use crate::graph::LocationGraph;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// A computed path together with its total length.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes to visit in order, source first, destination last.
    pub nodes: Vec<NodeId>,
    /// Sum of Euclidean segment lengths along `nodes`.
    pub distance: f64,
}

impl Route {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

// ── Distance oracle ───────────────────────────────────────────────────────────

/// Total length of `path`, summing the Euclidean distance between each pair
/// of consecutive nodes.
///
/// Independent of hop count: a five-hop corridor can be shorter than a
/// two-hop shortcut.  An empty path (no route) has infinite length.
pub fn path_distance(graph: &LocationGraph, path: &[NodeId]) -> f64 {
    if path.is_empty() {
        return f64::INFINITY;
    }
    path.windows(2)
        .map(|w| graph.pos(w[0]).distance(graph.pos(w[1])))
        .sum()
}

// ── PathSolver trait ──────────────────────────────────────────────────────────

/// Pluggable single-source shortest-path engine.
///
/// Implementations must be pure with respect to the graph (no interior
/// mutability), so one solver can serve any number of concurrent queries.
pub trait PathSolver: Send + Sync {
    /// Node sequence of a shortest path, or an empty `Vec` if none exists.
    fn shortest_path(&self, graph: &LocationGraph, from: NodeId, to: NodeId) -> Vec<NodeId>;

    /// Shortest-path length from `from` to `to`; `f64::INFINITY` if
    /// unreachable.
    fn distance(&self, graph: &LocationGraph, from: NodeId, to: NodeId) -> f64 {
        path_distance(graph, &self.shortest_path(graph, from, to))
    }

    /// Like [`shortest_path`](Self::shortest_path) but packages the result
    /// as a [`Route`] and reports an unreachable destination as
    /// [`SpatialError::NoPathFound`].
    fn route(&self, graph: &LocationGraph, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        let nodes = self.shortest_path(graph, from, to);
        if nodes.is_empty() {
            return Err(SpatialError::NoPathFound {
                from: display_name(graph, from),
                to:   display_name(graph, to),
            });
        }
        let distance = path_distance(graph, &nodes);
        Ok(Route { nodes, distance })
    }
}

impl<S: PathSolver + ?Sized> PathSolver for Box<S> {
    fn shortest_path(&self, graph: &LocationGraph, from: NodeId, to: NodeId) -> Vec<NodeId> {
        (**self).shortest_path(graph, from, to)
    }
}

fn display_name(graph: &LocationGraph, node: NodeId) -> String {
    if graph.contains(node) {
        graph.name(node).to_owned()
    } else {
        node.to_string()
    }
}

// ── LinearScanSolver ──────────────────────────────────────────────────────────

/// Classic Dijkstra with a linear minimum scan over the unvisited set.
///
/// The unvisited set is every graph node, scanned in declaration order; among
/// equal tentative distances the first one encountered is selected.  Scanning
/// stops as soon as the destination is selected.  O(N²), fine for a
/// building, see [`HeapSolver`] for larger maps.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearScanSolver;

impl PathSolver for LinearScanSolver {
    fn shortest_path(&self, graph: &LocationGraph, from: NodeId, to: NodeId) -> Vec<NodeId> {
        if !graph.contains(from) || !graph.contains(to) {
            return Vec::new();
        }
        if from == to {
            return vec![from];
        }

        let n = graph.node_count();
        let mut dist    = vec![f64::INFINITY; n];
        let mut prev    = vec![NodeId::INVALID; n];
        let mut visited = vec![false; n];
        dist[from.index()] = 0.0;

        loop {
            let mut current: Option<usize> = None;
            for i in 0..n {
                if !visited[i] && current.is_none_or(|c| dist[i] < dist[c]) {
                    current = Some(i);
                }
            }
            // Unvisited set exhausted, or only unreachable nodes remain.
            let Some(c) = current.filter(|&c| dist[c].is_finite()) else {
                break;
            };
            visited[c] = true;
            if c == to.index() {
                break;
            }

            let node = NodeId(c as u32);
            for (neighbor, weight) in graph.neighbors(node) {
                let alt = dist[c] + weight;
                if alt < dist[neighbor.index()] {
                    dist[neighbor.index()] = alt;
                    prev[neighbor.index()] = node;
                }
            }
        }

        reconstruct(&dist, &prev, to)
    }
}

// ── HeapSolver ────────────────────────────────────────────────────────────────

/// Dijkstra over a binary min-heap.
///
/// Same shortest distances as [`LinearScanSolver`], but among equal-cost
/// paths the choice follows heap order (lowest `NodeId` first), so the
/// exact node sequence may differ on ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapSolver;

/// Heap key ordered by `f64::total_cmp`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PathSolver for HeapSolver {
    fn shortest_path(&self, graph: &LocationGraph, from: NodeId, to: NodeId) -> Vec<NodeId> {
        if !graph.contains(from) || !graph.contains(to) {
            return Vec::new();
        }
        if from == to {
            return vec![from];
        }

        let n = graph.node_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut prev = vec![NodeId::INVALID; n];
        dist[from.index()] = 0.0;

        // Reverse makes BinaryHeap (max) behave as min-heap.
        let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
        heap.push(Reverse((Cost(0.0), from)));

        while let Some(Reverse((Cost(cost), node))) = heap.pop() {
            if node == to {
                break;
            }
            // Skip stale heap entries.
            if cost > dist[node.index()] {
                continue;
            }
            for (neighbor, weight) in graph.neighbors(node) {
                let alt = cost + weight;
                if alt < dist[neighbor.index()] {
                    dist[neighbor.index()] = alt;
                    prev[neighbor.index()] = node;
                    heap.push(Reverse((Cost(alt), neighbor)));
                }
            }
        }

        reconstruct(&dist, &prev, to)
    }
}

// ── Path reconstruction ───────────────────────────────────────────────────────

/// Walk predecessor links back from `to`.  Empty if `to` was never reached.
fn reconstruct(dist: &[f64], prev: &[NodeId], to: NodeId) -> Vec<NodeId> {
    if !dist[to.index()].is_finite() {
        return Vec::new();
    }
    let mut path = vec![to];
    let mut cur = to;
    while prev[cur.index()] != NodeId::INVALID {
        cur = prev[cur.index()];
        path.push(cur);
    }
    path.reverse();
    path
}
