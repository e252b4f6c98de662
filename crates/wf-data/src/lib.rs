//! `wf-data` — the location dataset and the loaders that produce it.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`dataset`] | `Dataset`, `NodeRecord`, `EdgeRecord`, graph construction |
//! | [`json`]    | map file loader (`nodes` / `turnPoints` / `edges`)        |
//! | `csv`       | CSV loaders for nodes, edges and synonyms                 |
//! | [`config`]  | `WayfinderConfig` from JSON                               |
//! | [`error`]   | `DataError`, `DataResult<T>`                              |
//!
//! [`load_dataset`] picks the loader from the path: a directory is read as
//! `nodes.csv` + `edges.csv` (+ optional `synonyms.csv`), anything else as a
//! JSON map file.

pub mod config;
pub mod csv;
pub mod dataset;
pub mod error;
pub mod json;


use std::path::Path;

pub use config::{load_config_json, parse_config_json};
pub use self::csv::{load_csv_dir, read_edges_csv, read_nodes_csv, read_synonyms_csv};
pub use dataset::{Dataset, EdgeRecord, NodeRecord};
pub use error::{DataError, DataResult};
pub use json::{load_map_json, parse_map_json, read_map_json};

/// Load a dataset from a JSON map file or a directory of CSV files.
pub fn load_dataset(path: &Path) -> DataResult<Dataset> {
    if path.is_dir() {
        load_csv_dir(path)
    } else {
        load_map_json(path)
    }
}
