//! The `Wayfinder` engine.

use tracing::{debug, info, warn};

use wf_core::{NodeId, RouteId, SolverKind, WayfinderConfig};
use wf_data::Dataset;
use wf_narrate::{arrival_text, plan_steps, AnnouncementSink, RouteNarrator};
use wf_resolve::UtteranceResolver;
use wf_spatial::{HeapSolver, LinearScanSolver, LocationGraph, PathSolver};

use crate::{InputEvent, Notice, Outcome, SessionResult, SessionState};

pub(crate) fn make_solver(kind: SolverKind) -> Box<dyn PathSolver> {
    match kind {
        SolverKind::LinearScan => Box::new(LinearScanSolver),
        SolverKind::Heap => Box::new(HeapSolver),
    }
}

/// Event-driven wayfinding engine.
///
/// Owns the graph and resolver compiled from one dataset (rebuilt only by
/// [`reload`](Self::reload)) and the session's single narration task.
/// Narration is spawned on the ambient Tokio runtime, so events that start a
/// route must be handled from within one.
///
/// Create via [`WayfinderBuilder`][crate::WayfinderBuilder].
pub struct Wayfinder<S: AnnouncementSink + Clone> {
    pub(crate) config:     WayfinderConfig,
    pub(crate) graph:      LocationGraph,
    pub(crate) resolver:   UtteranceResolver,
    pub(crate) solver:     Box<dyn PathSolver>,
    pub(crate) narrator:   RouteNarrator,
    pub(crate) sink:       S,
    pub(crate) next_route: RouteId,
}

impl<S: AnnouncementSink + Clone> Wayfinder<S> {
    pub fn config(&self) -> &WayfinderConfig {
        &self.config
    }

    pub fn graph(&self) -> &LocationGraph {
        &self.graph
    }

    pub fn resolver(&self) -> &UtteranceResolver {
        &self.resolver
    }

    pub fn is_narrating(&self) -> bool {
        self.narrator.is_active()
    }

    /// Handle one event.
    ///
    /// Never fails: anything that goes wrong is reported as a [`Notice`] and
    /// leaves the corresponding part of the state untouched.
    pub fn handle(&mut self, mut state: SessionState, event: InputEvent) -> Outcome {
        self.sanitize(&mut state);
        let mut notices = Vec::new();
        match event {
            InputEvent::LocationFix(id) => self.on_fix(&mut state, &id, &mut notices),
            InputEvent::Utterance(text) | InputEvent::Destination(text) => {
                self.on_request(&mut state, &text, &mut notices)
            }
        }
        Outcome { state, notices }
    }

    /// Stop narration without touching the destination.
    pub fn stop_narration(&mut self, mut state: SessionState) -> SessionState {
        self.narrator.cancel();
        state.route = None;
        state
    }

    /// Swap in a new dataset.
    ///
    /// The graph and resolver are rebuilt once.  Narration stops; a position
    /// or destination whose id no longer exists is dropped.  On error the
    /// engine keeps its previous dataset and `state` stays valid.
    pub fn reload(&mut self, dataset: &Dataset, state: &SessionState) -> SessionResult<SessionState> {
        let mut state = state.clone();
        self.sanitize(&mut state);
        let graph = dataset.build_graph()?;
        let resolver = UtteranceResolver::new(
            &graph,
            &dataset.synonyms,
            &self.config.normalizer,
            self.config.alias_matching,
        );

        let carry = |node: Option<NodeId>, what: &str| {
            let name = self.graph.name(node?);
            let carried = graph.lookup(name);
            if carried.is_none() {
                warn!(%name, what, "node no longer exists after reload; dropped");
            }
            carried
        };
        let next = SessionState {
            position:    carry(state.position, "position"),
            destination: carry(state.destination, "destination"),
            route:       None,
        };

        self.narrator.cancel();
        self.graph = graph;
        self.resolver = resolver;
        info!(nodes = self.graph.node_count(), "dataset reloaded");
        Ok(next)
    }

    /// Drop node ids that do not belong to the current graph, e.g. from a
    /// state captured before a reload.
    fn sanitize(&self, state: &mut SessionState) {
        let graph = &self.graph;
        let valid = |node: &mut Option<NodeId>, what: &str| {
            if let Some(stale) = node.filter(|&n| !graph.contains(n)) {
                warn!(node = %stale, what, "session state names a node outside the graph; dropped");
                *node = None;
            }
        };
        valid(&mut state.position, "position");
        valid(&mut state.destination, "destination");
        if state.route.is_some() && state.route != self.narrator.active_route() {
            state.route = None;
        }
    }

    // ── Event handlers ────────────────────────────────────────────────────

    fn on_fix(&mut self, state: &mut SessionState, id: &str, notices: &mut Vec<Notice>) {
        let Some(node) = self.graph.lookup(id) else {
            warn!(%id, "location fix names no known node");
            notices.push(Notice::PositionUnknown { id: id.to_owned() });
            return;
        };
        if state.position == Some(node) {
            if state.destination.is_none() || self.narrator.is_active() {
                debug!(%id, "repeated location fix ignored");
                return;
            }
            info!(%id, "repeated location fix; re-routing");
        } else {
            info!(%id, "position fixed");
        }

        state.position = Some(node);
        notices.push(Notice::PositionFixed { node, id: id.to_owned() });

        if state.destination.is_some() {
            self.route(state, notices);
        }
    }

    fn on_request(&mut self, state: &mut SessionState, text: &str, notices: &mut Vec<Notice>) {
        match self.resolver.resolve(&self.graph, &*self.solver, text, state.position) {
            Err(reason) => {
                info!(utterance = %text, %reason, "destination not resolved");
                notices.push(Notice::ResolutionFailed {
                    key: self.resolver.normalizer().key(text),
                    reason,
                });
            }
            Ok(resolution) => {
                let id = self.graph.name(resolution.node).to_owned();
                info!(utterance = %text, destination = %id, "destination resolved");
                state.destination = Some(resolution.node);
                notices.push(Notice::ResolvedDestination {
                    node:    resolution.node,
                    id,
                    key:     resolution.key,
                    matched: resolution.matched,
                });
                if state.position.is_some() {
                    self.route(state, notices);
                }
            }
        }
    }

    // ── Routing ───────────────────────────────────────────────────────────

    /// Route from the current position to the pending destination, replacing
    /// any narration in flight.
    fn route(&mut self, state: &mut SessionState, notices: &mut Vec<Notice>) {
        let (Some(from), Some(to)) = (state.position, state.destination) else {
            return;
        };
        self.narrator.cancel();
        state.route = None;

        if from == to {
            self.arrive(state, notices);
            return;
        }

        let route = match self.solver.route(&self.graph, from, to) {
            Ok(route) => route,
            Err(e) => {
                info!(error = %e, "no route");
                notices.push(Notice::RouteUnavailable {
                    from: self.graph.name(from).to_owned(),
                    to:   self.graph.name(to).to_owned(),
                });
                return;
            }
        };

        let id = self.next_route;
        self.next_route = id.next();

        let names: Vec<&str> = route.nodes.iter().map(|&n| self.graph.name(n)).collect();
        let summary = format!("Shortest path: {}", names.join(" → "));
        info!(route = %id, hops = route.nodes.len() - 1, distance = route.distance, "route computed");

        let steps = plan_steps(&self.graph, &route.nodes);
        let arrival = arrival_text(&self.graph, to);
        match self.narrator.start(id, steps, to, arrival, self.sink.clone()) {
            Ok(()) => state.route = Some(id),
            Err(e) => warn!(route = %id, error = %e, "narration not started"),
        }

        notices.push(Notice::RouteComputed {
            route:    id,
            path:     route.nodes,
            distance: route.distance,
            summary,
        });
    }

    fn arrive(&mut self, state: &mut SessionState, notices: &mut Vec<Notice>) {
        let Some(node) = state.destination.take() else {
            return;
        };
        self.narrator.cancel();
        state.route = None;
        let id = self.graph.name(node).to_owned();
        info!(%id, "arrived");
        notices.push(Notice::Arrived { node, id });
    }
}
