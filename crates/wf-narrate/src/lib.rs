//! `wf-narrate` — turn a computed route into paced, cancelable announcements.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`direction`] | `Direction`, `turn_direction`, `signed_turn_deg`          |
//! | [`plan`]      | `NarrationStep`, `plan_steps`, `arrival_text`             |
//! | [`narrator`]  | `RouteNarrator`, `Announcement`, `AnnouncementSink`       |
//! | [`error`]     | `NarrateError`, `NarrateResult<T>`                        |
//!
//! Planning is pure and synchronous.  Delivery runs as one Tokio task per
//! route; a [`RouteNarrator`] owns at most one such task at a time.

pub mod direction;
pub mod error;
pub mod narrator;
pub mod plan;


pub use direction::{signed_turn_deg, turn_direction, Direction, TURN_THRESHOLD_DEG};
pub use error::{NarrateError, NarrateResult};
pub use narrator::{Announcement, AnnouncementSink, RouteNarrator};
pub use plan::{arrival_text, plan_steps, NarrationStep};
