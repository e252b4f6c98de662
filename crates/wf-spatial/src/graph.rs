//! Location graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing
//! half-edges.  Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Every undirected edge of the dataset is stored as two half-edges with the
//! same Euclidean weight, so `weight(a, b) == weight(b, a)` by construction.
//! Within one node's slice, half-edges keep the order in which their edges
//! were declared; the linear-scan solver's tie-breaking depends on it.
//!
//! # Node order
//!
//! `NodeId`s are assigned in declaration order (locations first when loaded
//! from a map file).  Category instances are enumerated in the same order.

use rustc_hash::FxHashMap;
use tracing::warn;

use wf_core::{Category, EdgeId, NodeId, NodeKind, Point};

use crate::{SpatialError, SpatialResult};

// ── LocationGraph ─────────────────────────────────────────────────────────────

/// Undirected, Euclidean-weighted location graph in CSR format.
///
/// All per-node and per-edge arrays are `pub` for direct indexed access in
/// solver inner loops.  Do not construct directly; use
/// [`LocationGraphBuilder`].
#[derive(Debug, Clone)]
pub struct LocationGraph {
    // ── Node data (indexed by NodeId) ─────────────────────────────────────
    /// Canonical identifier of each node, e.g. `"MainGateway"`.
    pub node_name: Vec<String>,
    pub node_pos: Vec<Point>,
    pub node_kind: Vec<NodeKind>,
    pub node_category: Vec<Option<Category>>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Half-edge data (indexed by EdgeId) ────────────────────────────────
    pub edge_from: Vec<NodeId>,
    pub edge_to: Vec<NodeId>,
    /// Euclidean length between the endpoints' coordinates.
    pub edge_weight: Vec<f64>,

    index: FxHashMap<String, NodeId>,
    rejected: Vec<SpatialError>,
}

impl LocationGraph {
    /// A graph with no nodes.  Every query against it comes back empty.
    pub fn empty() -> Self {
        LocationGraphBuilder::new().build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_name.len()
    }

    /// Number of directed half-edges (twice the accepted edge count).
    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_name.is_empty()
    }

    // ── Node lookup ───────────────────────────────────────────────────────

    /// Resolve a canonical identifier (exact, case-sensitive) to its `NodeId`.
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Like [`lookup`](Self::lookup) but reports a missing node as an error.
    pub fn require(&self, name: &str) -> SpatialResult<NodeId> {
        self.lookup(name)
            .ok_or_else(|| SpatialError::NodeNotFound(name.to_owned()))
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    #[inline]
    pub fn name(&self, node: NodeId) -> &str {
        &self.node_name[node.index()]
    }

    #[inline]
    pub fn pos(&self, node: NodeId) -> Point {
        self.node_pos[node.index()]
    }

    #[inline]
    pub fn kind(&self, node: NodeId) -> NodeKind {
        self.node_kind[node.index()]
    }

    #[inline]
    pub fn category(&self, node: NodeId) -> Option<&Category> {
        self.node_category[node.index()].as_ref()
    }

    /// All node ids in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_count()).map(|i| NodeId(i as u32))
    }

    /// User-facing locations in declaration order.
    pub fn locations(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes().filter(|&n| self.kind(n).is_location())
    }

    /// Every node tagged `category`, in declaration order.
    pub fn instances_of<'a>(&'a self, category: &'a Category) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes()
            .filter(move |&n| self.category(n) == Some(category))
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing half-edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// `(neighbor, weight)` pairs of `node`, in edge declaration order.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.out_edges(node)
            .map(|e| (self.edge_to[e.index()], self.edge_weight[e.index()]))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Weight of the first half-edge `from → to`, if the nodes are adjacent.
    pub fn weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.neighbors(from)
            .find(|&(n, _)| n == to)
            .map(|(_, w)| w)
    }

    /// Edges that were skipped at build time, each as a
    /// [`SpatialError::MissingCoordinate`].
    pub fn rejected_edges(&self) -> &[SpatialError] {
        &self.rejected
    }
}

// ── LocationGraphBuilder ──────────────────────────────────────────────────────

/// Construct a [`LocationGraph`] from a coordinate lookup and an edge list,
/// then call [`build`](Self::build).
///
/// Nodes and edges may be added in any order; edges are resolved against the
/// node table only at `build()` time.
///
/// # Example
///
/// ```
/// use wf_core::Point;
/// use wf_spatial::LocationGraphBuilder;
///
/// let mut b = LocationGraphBuilder::new();
/// b.add_location("Lobby", Point::new(0.0, 0.0)).unwrap();
/// b.add_location("Cafe", Point::new(3.0, 4.0)).unwrap();
/// b.add_edge("Lobby", "Cafe");
/// let graph = b.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // both directions
/// ```
#[derive(Default)]
pub struct LocationGraphBuilder {
    nodes:     Vec<RawNode>,
    index:     FxHashMap<String, NodeId>,
    raw_edges: Vec<(String, String)>,
}

struct RawNode {
    name:     String,
    pos:      Point,
    kind:     NodeKind,
    category: Option<Category>,
}

struct HalfEdge {
    from:   NodeId,
    to:     NodeId,
    weight: f64,
}

impl LocationGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            index:     FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(
        &mut self,
        name:     impl Into<String>,
        pos:      Point,
        kind:     NodeKind,
        category: Option<Category>,
    ) -> SpatialResult<NodeId> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(SpatialError::DuplicateNode(name));
        }
        let id = NodeId(self.nodes.len() as u32);
        self.index.insert(name.clone(), id);
        self.nodes.push(RawNode { name, pos, kind, category });
        Ok(id)
    }

    /// Convenience: an uncategorised user-facing location.
    pub fn add_location(&mut self, name: impl Into<String>, pos: Point) -> SpatialResult<NodeId> {
        self.add_node(name, pos, NodeKind::Location, None)
    }

    /// Convenience: a geometry-only waypoint.
    pub fn add_waypoint(&mut self, name: impl Into<String>, pos: Point) -> SpatialResult<NodeId> {
        self.add_node(name, pos, NodeKind::Waypoint, None)
    }

    /// Add an undirected edge between two node identifiers.
    ///
    /// The endpoints need not exist yet; an edge whose endpoint is still
    /// unknown at `build()` time is rejected individually.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.raw_edges.push((from.into(), to.into()));
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`LocationGraph`].
    ///
    /// Each edge is resolved against the node table and inserted in both
    /// directions with its Euclidean weight.  Edges naming an unknown node
    /// are logged, recorded in [`LocationGraph::rejected_edges`], and
    /// skipped; the build itself never fails.
    pub fn build(self) -> LocationGraph {
        let node_count = self.nodes.len();

        let mut half_edges: Vec<HalfEdge> = Vec::with_capacity(self.raw_edges.len() * 2);
        let mut rejected = Vec::new();

        for (from, to) in &self.raw_edges {
            let (a, b) = match (self.index.get(from), self.index.get(to)) {
                (Some(&a), Some(&b)) => (a, b),
                (a, _) => {
                    let missing = if a.is_none() { from } else { to };
                    warn!(%from, %to, %missing, "skipping edge with missing coordinate");
                    rejected.push(SpatialError::MissingCoordinate {
                        from:    from.clone(),
                        to:      to.clone(),
                        missing: missing.clone(),
                    });
                    continue;
                }
            };
            let weight = self.nodes[a.index()].pos.distance(self.nodes[b.index()].pos);
            half_edges.push(HalfEdge { from: a, to: b, weight });
            half_edges.push(HalfEdge { from: b, to: a, weight });
        }

        // Stable sort: each node's neighbors stay in edge declaration order.
        half_edges.sort_by_key(|e| e.from.0);

        let edge_from:   Vec<NodeId> = half_edges.iter().map(|e| e.from).collect();
        let edge_to:     Vec<NodeId> = half_edges.iter().map(|e| e.to).collect();
        let edge_weight: Vec<f64>    = half_edges.iter().map(|e| e.weight).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &half_edges {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, half_edges.len());

        let mut node_name     = Vec::with_capacity(node_count);
        let mut node_pos      = Vec::with_capacity(node_count);
        let mut node_kind     = Vec::with_capacity(node_count);
        let mut node_category = Vec::with_capacity(node_count);
        for n in self.nodes {
            node_name.push(n.name);
            node_pos.push(n.pos);
            node_kind.push(n.kind);
            node_category.push(n.category);
        }

        LocationGraph {
            node_name,
            node_pos,
            node_kind,
            node_category,
            node_out_start,
            edge_from,
            edge_to,
            edge_weight,
            index: self.index,
            rejected,
        }
    }
}
