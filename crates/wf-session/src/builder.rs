//! Fluent builder for constructing a [`Wayfinder`].

use tracing::info;

use wf_core::{RouteId, WayfinderConfig};
use wf_data::Dataset;
use wf_narrate::{AnnouncementSink, RouteNarrator};
use wf_resolve::UtteranceResolver;
use wf_spatial::PathSolver;

use crate::wayfinder::make_solver;
use crate::{SessionResult, Wayfinder};

/// Fluent builder for [`Wayfinder<S>`].
///
/// # Required inputs
///
/// - [`Dataset`] — nodes, edges and synonyms of the venue
/// - `S: AnnouncementSink` — where narration goes (e.g. an
///   `mpsc::UnboundedSender<Announcement>`)
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                   |
/// |-----------------|-------------------------------------------|
/// | `.config(c)`    | `WayfinderConfig::default()`              |
/// | `.solver(s)`    | the solver named by `config.solver`       |
///
/// # Example
///
/// ```rust,ignore
/// let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
/// let mut wayfinder = WayfinderBuilder::new(dataset, tx)
///     .config(config)
///     .build()?;
/// let outcome = wayfinder.handle(SessionState::new(), InputEvent::LocationFix("MainGateway".into()));
/// ```
pub struct WayfinderBuilder<S: AnnouncementSink + Clone> {
    dataset: Dataset,
    sink:    S,
    config:  Option<WayfinderConfig>,
    solver:  Option<Box<dyn PathSolver>>,
}

impl<S: AnnouncementSink + Clone> WayfinderBuilder<S> {
    pub fn new(dataset: Dataset, sink: S) -> Self {
        Self { dataset, sink, config: None, solver: None }
    }

    pub fn config(mut self, config: WayfinderConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a custom solver instead of the one `config.solver` names.
    pub fn solver(mut self, solver: impl PathSolver + 'static) -> Self {
        self.solver = Some(Box::new(solver));
        self
    }

    /// Validate the configuration, build the graph and compile the resolver.
    pub fn build(self) -> SessionResult<Wayfinder<S>> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let graph = self.dataset.build_graph()?;
        let resolver = UtteranceResolver::new(
            &graph,
            &self.dataset.synonyms,
            &config.normalizer,
            config.alias_matching,
        );
        let solver = self.solver.unwrap_or_else(|| make_solver(config.solver));
        let narrator = RouteNarrator::new(&config.narration);

        info!(
            nodes = graph.node_count(),
            synonyms = self.dataset.synonyms.len(),
            solver = ?config.solver,
            matching = ?config.alias_matching,
            "wayfinder ready"
        );

        Ok(Wayfinder {
            config,
            graph,
            resolver,
            solver,
            narrator,
            sink: self.sink,
            next_route: RouteId(0),
        })
    }
}
