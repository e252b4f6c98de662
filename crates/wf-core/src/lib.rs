//! `wf-core` — foundational types for the `wayfind` indoor navigation engine.
//!
//! This crate is a dependency of every other `wf-*` crate.  It intentionally
//! has no `wf-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `EdgeId`, `RouteId`                            |
//! | [`geo`]      | `Point`, Euclidean distance, polar heading               |
//! | [`node`]     | `NodeKind`, `Category`                                   |
//! | [`config`]   | `WayfinderConfig` and its per-component sections         |
//! | [`error`]    | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required for loading configuration and map files.          |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod node;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AliasMatching, NarrationConfig, NormalizerConfig, SolverKind, WayfinderConfig};
pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{EdgeId, NodeId, RouteId};
pub use node::{Category, NodeKind};
