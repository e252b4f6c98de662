//! `wf-spatial` — location graph, graph building, and shortest paths.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`graph`]  | `LocationGraph` (CSR), `LocationGraphBuilder`                |
//! | [`solver`] | `PathSolver` trait, `Route`, `LinearScanSolver`, `HeapSolver`, `path_distance` |
//! | [`error`]  | `SpatialError`, `SpatialResult<T>`                           |
//!
//! The graph is built once per dataset and shared read-only; solvers hold no
//! state, so every query is re-entrant.

pub mod error;
pub mod graph;
pub mod solver;


pub use error::{SpatialError, SpatialResult};
pub use graph::{LocationGraph, LocationGraphBuilder};
pub use solver::{path_distance, HeapSolver, LinearScanSolver, PathSolver, Route};
