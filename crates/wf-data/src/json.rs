//! JSON map file loader.
//!
//! # Format
//!
//! ```json
//! {
//!   "nodes":      { "MainGateway": { "x": 120, "y": 40 }, "Staircase1": { "x": 300, "y": 40 } },
//!   "turnPoints": { "T1": { "x": 200, "y": 40 } },
//!   "edges":      [ { "from": "MainGateway", "to": "T1" }, { "from": "T1", "to": "Staircase1" } ],
//!   "categories": { "MainGateway": "Gateway", "Staircase1": "Staircase" },
//!   "synonyms":   {
//!     "MainGateway":        ["main gateway", "main entrance"],
//!     "category:staircase": ["staircase", "stairs"]
//!   }
//! }
//! ```
//!
//! `nodes` are user-facing locations, `turnPoints` geometry-only waypoints.
//! Object key order is declaration order.  `categories` and `synonyms` are
//! optional.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use wf_core::{Category, NodeKind};
use wf_resolve::{SynonymTable, SynonymTarget};

use crate::dataset::{node_pos, Dataset, EdgeRecord, NodeRecord};
use crate::{DataError, DataResult};

// ── File schema ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MapFile {
    #[serde(default)]
    nodes:       Map<String, Value>,
    #[serde(default)]
    turn_points: Map<String, Value>,
    #[serde(default)]
    edges:       Vec<EdgeRecord>,
    #[serde(default)]
    categories:  Map<String, Value>,
    #[serde(default)]
    synonyms:    Map<String, Value>,
}

#[derive(Deserialize)]
struct Coord {
    x: f64,
    y: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a dataset from a JSON map file.
pub fn load_map_json(path: &Path) -> DataResult<Dataset> {
    let file = std::fs::File::open(path)?;
    read_map_json(std::io::BufReader::new(file))
}

/// Like [`load_map_json`] but accepts any `Read` source.
pub fn read_map_json<R: Read>(reader: R) -> DataResult<Dataset> {
    into_dataset(serde_json::from_reader(reader)?)
}

pub fn parse_map_json(text: &str) -> DataResult<Dataset> {
    into_dataset(serde_json::from_str(text)?)
}

// ── Conversion ────────────────────────────────────────────────────────────────

fn into_dataset(file: MapFile) -> DataResult<Dataset> {
    let MapFile { nodes, turn_points, edges, mut categories, synonyms } = file;

    let mut records = Vec::with_capacity(nodes.len() + turn_points.len());
    for (section, entries, kind) in [
        ("nodes", nodes, NodeKind::Location),
        ("turnPoints", turn_points, NodeKind::Waypoint),
    ] {
        for (id, value) in entries {
            let Coord { x, y } = serde_json::from_value(value)
                .map_err(|e| DataError::Parse(format!("{section}.{id}: {e}")))?;
            let category = match categories.remove(&id) {
                None | Some(Value::Null) => None,
                Some(Value::String(tag)) => Some(Category::parse(&tag)),
                Some(other) => {
                    return Err(DataError::Parse(format!(
                        "categories.{id}: expected a string, got {other}"
                    )));
                }
            };
            let pos = node_pos(&format!("{section}.{id}"), x, y)?;
            records.push(NodeRecord { id, pos, kind, category });
        }
    }
    for id in categories.keys() {
        warn!(%id, "category given for an undefined node; ignored");
    }

    let mut table = SynonymTable::new();
    for (canonical, aliases) in synonyms {
        let aliases: Vec<String> = serde_json::from_value(aliases)
            .map_err(|e| DataError::Parse(format!("synonyms.{canonical}: {e}")))?;
        let Ok(target) = canonical.parse::<SynonymTarget>();
        table.insert(target, aliases);
    }

    Ok(Dataset { nodes: records, edges, synonyms: table })
}
