//! Paced delivery of planned steps as a cancelable Tokio task.
//!
//! # Stale-announcement guard
//!
//! Cancelling a task only stops it at its next `.await`.  To make sure no
//! step of an older route slips out after a newer route has started, every
//! emission happens while holding the `active` lock and only if `active`
//! still names the emitting route.  [`RouteNarrator::start`] swaps `active`
//! under the same lock, so once it returns the old task can no longer emit.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use wf_core::{NarrationConfig, NodeId, RouteId};

use crate::plan::NarrationStep;
use crate::NarrateResult;

// ── Announcement ──────────────────────────────────────────────────────────────

/// Something the narrator says, tagged with the route it belongs to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Announcement {
    Step    { route: RouteId, step: NarrationStep },
    Arrival { route: RouteId, destination: NodeId, text: String },
}

impl Announcement {
    pub fn route(&self) -> RouteId {
        match self {
            Announcement::Step { route, .. } | Announcement::Arrival { route, .. } => *route,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Announcement::Step { step, .. } => &step.text,
            Announcement::Arrival { text, .. } => text,
        }
    }
}

/// Consumer of announcements (speech synthesis, a terminal, a test channel).
pub trait AnnouncementSink: Send + Sync + 'static {
    /// Deliver one announcement.  Returns `false` once the consumer is gone;
    /// the narration task then stops.
    fn announce(&self, announcement: Announcement) -> bool;
}

impl AnnouncementSink for mpsc::UnboundedSender<Announcement> {
    fn announce(&self, announcement: Announcement) -> bool {
        self.send(announcement).is_ok()
    }
}

// ── RouteNarrator ─────────────────────────────────────────────────────────────

type ActiveRoute = Arc<Mutex<Option<RouteId>>>;

fn lock(active: &ActiveRoute) -> MutexGuard<'_, Option<RouteId>> {
    active.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the single in-flight narration of a session.
pub struct RouteNarrator {
    interval: Duration,
    active:   ActiveRoute,
    cancel:   Option<CancellationToken>,
}

impl RouteNarrator {
    pub fn new(config: &NarrationConfig) -> Self {
        Self::with_interval(config.step_interval())
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self { interval, active: Arc::new(Mutex::new(None)), cancel: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Route currently being narrated, if any.  Cleared when the arrival
    /// announcement goes out or the narration is cancelled.
    pub fn active_route(&self) -> Option<RouteId> {
        *lock(&self.active)
    }

    pub fn is_active(&self) -> bool {
        self.active_route().is_some()
    }

    /// Start narrating `route`, cancelling whatever was in flight.
    ///
    /// Each step is delivered one interval after the previous one (the first
    /// one interval after the call), followed one interval later by an
    /// arrival announcement naming `destination`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start<S: AnnouncementSink>(
        &mut self,
        route:       RouteId,
        steps:       Vec<NarrationStep>,
        destination: NodeId,
        arrival:     String,
        sink:        S,
    ) -> NarrateResult<()> {
        let handle = Handle::try_current()?;

        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        let previous = lock(&self.active).replace(route);
        if let Some(previous) = previous {
            info!(%previous, %route, "narration superseded");
        }

        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        info!(%route, steps = steps.len(), "narration started");

        let task = NarrationTask {
            route,
            steps,
            destination,
            arrival,
            interval: self.interval,
            active: Arc::clone(&self.active),
            cancel: token,
            sink,
        };
        handle.spawn(task.run());
        Ok(())
    }

    /// Stop the in-flight narration, if any.  Returns the route that was
    /// being narrated.
    pub fn cancel(&mut self) -> Option<RouteId> {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        let cancelled = lock(&self.active).take();
        if let Some(route) = cancelled {
            info!(%route, "narration cancelled");
        }
        cancelled
    }
}

impl Drop for RouteNarrator {
    fn drop(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }
}

impl std::fmt::Debug for RouteNarrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteNarrator")
            .field("interval", &self.interval)
            .field("active", &self.active_route())
            .finish()
    }
}

// ── Task ──────────────────────────────────────────────────────────────────────

struct NarrationTask<S> {
    route:       RouteId,
    steps:       Vec<NarrationStep>,
    destination: NodeId,
    arrival:     String,
    interval:    Duration,
    active:      ActiveRoute,
    cancel:      CancellationToken,
    sink:        S,
}

impl<S: AnnouncementSink> NarrationTask<S> {
    async fn run(mut self) {
        let steps = std::mem::take(&mut self.steps);
        for step in steps {
            if !self.wait().await {
                return;
            }
            if !self.emit(Announcement::Step { route: self.route, step }, false) {
                return;
            }
        }
        if !self.wait().await {
            return;
        }
        let arrival = Announcement::Arrival {
            route:       self.route,
            destination: self.destination,
            text:        self.arrival.clone(),
        };
        if self.emit(arrival, true) {
            info!(route = %self.route, "narration finished");
        }
    }

    /// Sleep one interval.  `false` if cancelled first.
    async fn wait(&self) -> bool {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                debug!(route = %self.route, "narration task stopped");
                false
            }
            _ = tokio::time::sleep(self.interval) => true,
        }
    }

    /// Deliver `announcement` if this route is still the active one.
    /// `last` clears the active route in the same critical section.
    fn emit(&self, announcement: Announcement, last: bool) -> bool {
        let mut active = lock(&self.active);
        if *active != Some(self.route) {
            debug!(route = %self.route, "stale announcement dropped");
            return false;
        }
        if last {
            *active = None;
        }
        if !self.sink.announce(announcement) {
            debug!(route = %self.route, "announcement sink closed");
            *active = None;
            return false;
        }
        true
    }
}
