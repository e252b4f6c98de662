//! Engine configuration.
//!
//! Typically loaded from a JSON file by the application crate and passed to
//! `wf_session::WayfinderBuilder`.  Every section has a `Default` that
//! reproduces the reference kiosk behavior, so a config file only needs to
//! list the fields it changes.

use std::time::Duration;

use crate::{CoreError, CoreResult};

// ── Normalizer ────────────────────────────────────────────────────────────────

/// Text normalization applied identically to utterances, node ids and aliases.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NormalizerConfig {
    /// Phrases removed wherever they occur as whole words
    /// (`"take me to"`, `"nearest"`, …).
    pub fillers: Vec<String>,

    /// Whole-word corrections for common mis-transcriptions, applied after
    /// filler removal.  Ordered `(heard, meant)` pairs; the first match wins.
    pub homophones: Vec<(String, String)>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        let fillers = ["i want to go to", "take me to", "bring me to", "go to", "nearest"];
        let homophones = [("and", "n"), ("end", "n"), ("add", "n"), ("mail", "male")];
        Self {
            fillers:    fillers.iter().map(|s| s.to_string()).collect(),
            homophones: homophones.iter().map(|(a, b)| (a.to_string(), b.to_string())).collect(),
        }
    }
}

// ── Alias matching ────────────────────────────────────────────────────────────

/// How an alias is tested against a normalized utterance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AliasMatching {
    /// The alias must occur as a run of whole words in the utterance.
    #[default]
    TokenBoundary,
    /// The alias key may occur anywhere inside the utterance key.  Lenient:
    /// `"olive"` matches `"oliver street"`.
    Substring,
}

// ── Solver ────────────────────────────────────────────────────────────────────

/// Shortest-path implementation used for routing and the distance oracle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SolverKind {
    /// O(N²) minimum scan; ties go to the earliest-declared node.
    #[default]
    LinearScan,
    /// Binary heap; ties go to the lowest `NodeId`.  Use for large maps.
    Heap,
}

// ── Narration ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NarrationConfig {
    /// Delay before each announcement, in milliseconds.  Default: 4000.
    pub step_interval_ms: u64,
}

impl NarrationConfig {
    #[inline]
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self { step_interval_ms: 4_000 }
    }
}

// ── WayfinderConfig ───────────────────────────────────────────────────────────

/// Top-level engine configuration.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WayfinderConfig {
    pub normalizer:     NormalizerConfig,
    pub alias_matching: AliasMatching,
    pub solver:         SolverKind,
    pub narration:      NarrationConfig,
}

impl WayfinderConfig {
    /// Reject settings that would make the engine misbehave silently.
    pub fn validate(&self) -> CoreResult<()> {
        if self.narration.step_interval_ms == 0 {
            return Err(CoreError::Config("narration.step_interval_ms must be > 0".into()));
        }
        if let Some(i) = self.normalizer.fillers.iter().position(|f| f.trim().is_empty()) {
            return Err(CoreError::Config(format!("normalizer.fillers[{i}] is empty")));
        }
        if let Some(i) = self
            .normalizer
            .homophones
            .iter()
            .position(|(heard, _)| heard.trim().is_empty())
        {
            return Err(CoreError::Config(format!("normalizer.homophones[{i}] has an empty key")));
        }
        Ok(())
    }
}
