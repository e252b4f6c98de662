//! CSV loaders.
//!
//! # Formats
//!
//! `nodes.csv` — one row per node, declaration order = row order.  `kind` is
//! `location` (default when empty) or `waypoint`; `category` may be empty.
//!
//! ```csv
//! id,x,y,kind,category
//! MainGateway,120,40,location,Gateway
//! T1,200,40,waypoint,
//! Staircase1,300,40,location,Staircase
//! ```
//!
//! `edges.csv`:
//!
//! ```csv
//! from,to
//! MainGateway,T1
//! T1,Staircase1
//! ```
//!
//! `synonyms.csv` — one alias per row; entries keep the order in which their
//! canonical first appears.
//!
//! ```csv
//! canonical,alias
//! MainGateway,main entrance
//! category:staircase,stairs
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use wf_core::{Category, NodeKind};
use wf_resolve::SynonymTable;

use crate::dataset::{node_pos, Dataset, EdgeRecord, NodeRecord};
use crate::DataResult;

pub const NODES_FILE: &str = "nodes.csv";
pub const EDGES_FILE: &str = "edges.csv";
pub const SYNONYMS_FILE: &str = "synonyms.csv";

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRow {
    id:       String,
    x:        f64,
    y:        f64,
    #[serde(default)]
    kind:     String,
    #[serde(default)]
    category: String,
}

#[derive(Deserialize)]
struct SynonymRow {
    canonical: String,
    alias:     String,
}

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(source)
}

// ── Public API ────────────────────────────────────────────────────────────────

pub fn read_nodes_csv<R: Read>(source: R) -> DataResult<Vec<NodeRecord>> {
    let mut nodes = Vec::new();
    for row in reader(source).deserialize::<NodeRow>() {
        let row = row?;
        let category = match row.category.as_str() {
            "" => None,
            tag => Some(Category::parse(tag)),
        };
        nodes.push(NodeRecord {
            kind: row.kind.parse::<NodeKind>()?,
            pos: node_pos(&row.id, row.x, row.y)?,
            id: row.id,
            category,
        });
    }
    Ok(nodes)
}

pub fn read_edges_csv<R: Read>(source: R) -> DataResult<Vec<EdgeRecord>> {
    reader(source)
        .deserialize::<EdgeRecord>()
        .map(|row| row.map_err(Into::into))
        .collect()
}

pub fn read_synonyms_csv<R: Read>(source: R) -> DataResult<SynonymTable> {
    let rows = reader(source)
        .deserialize::<SynonymRow>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SynonymTable::from_rows(rows.iter().map(|r| (r.canonical.as_str(), r.alias.as_str()))))
}

/// Load `nodes.csv`, `edges.csv` and, if present, `synonyms.csv` from `dir`.
pub fn load_csv_dir(dir: &Path) -> DataResult<Dataset> {
    let nodes = read_nodes_csv(std::fs::File::open(dir.join(NODES_FILE))?)?;
    let edges = read_edges_csv(std::fs::File::open(dir.join(EDGES_FILE))?)?;

    let synonyms_path = dir.join(SYNONYMS_FILE);
    let synonyms = if synonyms_path.exists() {
        read_synonyms_csv(std::fs::File::open(synonyms_path)?)?
    } else {
        SynonymTable::new()
    };

    Ok(Dataset { nodes, edges, synonyms })
}
