//! Engine configuration from JSON.
//!
//! ```json
//! {
//!   "alias_matching": "substring",
//!   "solver": "heap",
//!   "narration": { "step_interval_ms": 2500 }
//! }
//! ```
//!
//! Omitted fields keep their defaults.  The result is validated before it is
//! returned.

use std::path::Path;

use wf_core::WayfinderConfig;

use crate::DataResult;

pub fn load_config_json(path: &Path) -> DataResult<WayfinderConfig> {
    parse_config_json(&std::fs::read_to_string(path)?)
}

pub fn parse_config_json(text: &str) -> DataResult<WayfinderConfig> {
    let config: WayfinderConfig = serde_json::from_str(text)?;
    config.validate()?;
    Ok(config)
}
