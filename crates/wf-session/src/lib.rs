//! `wf-session` — the event-driven wayfinding engine.
//!
//! # Event flow
//!
//! ```text
//! LocationFix(id)   ─► position := id ─────────────────────┐
//! Utterance(text)   ─┐                                      │ position and
//! Destination(text) ─┴► UtteranceResolver ─► destination ──┤ destination known
//!                                                           ▼
//!                            PathSolver ─► Notice::RouteComputed
//!                                      └─► RouteNarrator (paced, cancelable)
//! ```
//!
//! Session state is an explicit [`SessionState`] value: each call to
//! [`Wayfinder::handle`] takes the current state and returns the next one
//! together with the [`Notice`]s to show or speak.  The engine itself holds
//! only the dataset-derived graph and resolver plus the narration task.
//!
//! # Crate layout
//!
//! | Module        | Contents                                         |
//! |---------------|--------------------------------------------------|
//! | [`state`]     | `SessionState`, `InputEvent`, `Notice`, `Outcome`|
//! | [`wayfinder`] | `Wayfinder` — event handling and reload          |
//! | [`builder`]   | `WayfinderBuilder`                               |
//! | [`error`]     | `SessionError`, `SessionResult<T>`               |

pub mod builder;
pub mod error;
pub mod state;
pub mod wayfinder;

#[cfg(test)]
mod tests;

pub use builder::WayfinderBuilder;
pub use error::{SessionError, SessionResult};
pub use state::{InputEvent, Notice, Outcome, SessionState};
pub use wayfinder::Wayfinder;
