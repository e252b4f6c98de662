//! Utterance → destination resolution.
//!
//! # Pipeline
//!
//! ```text
//! utterance ─► normalize ─► ① direct match on a location id
//!                        └► ② first synonym entry whose alias matches
//!                              ├─ node target      → done
//!                              └─ category target  → ③ nearest instance
//!                                                     from current position
//! ```
//!
//! The resolver is compiled once per dataset: node ids and aliases are
//! normalized up front so a query only normalizes the utterance itself.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use wf_core::{AliasMatching, Category, NodeId, NormalizerConfig};
use wf_spatial::{LocationGraph, PathSolver};

use crate::normalize::{Normalized, Normalizer};
use crate::synonyms::{SynonymTable, SynonymTarget};
use crate::{ResolveError, ResolveResult};

// ── Resolution ────────────────────────────────────────────────────────────────

/// How a destination was found.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchKind {
    /// The utterance key equals a location's canonical id key.
    Direct,
    /// An alias of a concrete node matched.
    Alias { alias: String },
    /// An alias of a category matched; `node` is the closest instance.
    Nearest { category: Category, distance: f64 },
}

/// A successfully resolved destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub node:    NodeId,
    /// Normalized key of the utterance that produced this resolution.
    pub key:     String,
    pub matched: MatchKind,
}

// ── UtteranceResolver ─────────────────────────────────────────────────────────

enum CompiledTarget {
    Node(NodeId),
    Category(Category),
}

struct CompiledEntry {
    target:  CompiledTarget,
    aliases: Vec<(String, Normalized)>,
}

/// Resolves free-form destination phrases against one [`LocationGraph`].
///
/// Must be rebuilt whenever the graph is; `NodeId`s inside are only valid
/// for the graph it was compiled against.
pub struct UtteranceResolver {
    normalizer: Normalizer,
    matching:   AliasMatching,
    /// Normalized location id → node.  Waypoints are not addressable.
    direct:     FxHashMap<String, NodeId>,
    entries:    Vec<CompiledEntry>,
}

impl UtteranceResolver {
    /// Compile `synonyms` against `graph`.
    ///
    /// Entries naming an unknown node are dropped with a warning, as are
    /// aliases that normalize to nothing.  When two location ids normalize to
    /// the same key, the earlier-declared one wins.
    pub fn new(
        graph:    &LocationGraph,
        synonyms: &SynonymTable,
        config:   &NormalizerConfig,
        matching: AliasMatching,
    ) -> Self {
        let normalizer = Normalizer::new(config);

        let mut direct = FxHashMap::default();
        for node in graph.locations() {
            let key = normalizer.key(graph.name(node));
            if key.is_empty() {
                warn!(id = graph.name(node), "location id normalizes to nothing");
                continue;
            }
            if let Some(&first) = direct.get(&key) {
                warn!(
                    id = graph.name(node),
                    shadowed_by = graph.name(first),
                    %key,
                    "location ids collide after normalization"
                );
                continue;
            }
            direct.insert(key, node);
        }

        let mut entries = Vec::with_capacity(synonyms.len());
        for entry in synonyms.entries() {
            let target = match &entry.target {
                SynonymTarget::Node(id) => match graph.lookup(id) {
                    Some(node) => CompiledTarget::Node(node),
                    None => {
                        warn!(%id, "synonym entry names an unknown node; skipped");
                        continue;
                    }
                },
                SynonymTarget::Category(category) => {
                    if graph.instances_of(category).next().is_none() {
                        warn!(%category, "synonym entry names a category with no instances");
                    }
                    CompiledTarget::Category(category.clone())
                }
            };

            let aliases: Vec<(String, Normalized)> = entry
                .aliases
                .iter()
                .filter_map(|alias| {
                    let normalized = normalizer.normalize(alias);
                    if normalized.is_empty() {
                        warn!(canonical = %entry.target, %alias, "alias normalizes to nothing; skipped");
                        None
                    } else {
                        Some((alias.clone(), normalized))
                    }
                })
                .collect();

            entries.push(CompiledEntry { target, aliases });
        }

        Self { normalizer, matching, direct, entries }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Resolve `utterance` to exactly one node of `graph`.
    ///
    /// `position` is the pedestrian's current node, if known; it is needed
    /// only when the phrase names a category.
    pub fn resolve(
        &self,
        graph:     &LocationGraph,
        solver:    &dyn PathSolver,
        utterance: &str,
        position:  Option<NodeId>,
    ) -> ResolveResult<Resolution> {
        let input = self.normalizer.normalize(utterance);
        let unresolved = || ResolveError::Unresolved { utterance: utterance.to_owned() };
        if input.is_empty() {
            return Err(unresolved());
        }
        let key = input.key().to_owned();

        // ① Direct match.
        if let Some(&node) = self.direct.get(&key) {
            debug!(%key, id = graph.name(node), "direct match");
            return Ok(Resolution { node, key, matched: MatchKind::Direct });
        }

        // ② Synonym match: first entry, in declared order, with a matching alias.
        let hit = self.entries.iter().find_map(|entry| {
            entry
                .aliases
                .iter()
                .find(|(_, alias)| self.alias_matches(&input, alias))
                .map(|(text, _)| (entry, text))
        });
        let Some((entry, alias)) = hit else {
            debug!(%key, "no match");
            return Err(unresolved());
        };

        match &entry.target {
            CompiledTarget::Node(node) => {
                debug!(%key, %alias, id = graph.name(*node), "alias match");
                Ok(Resolution { node: *node, key, matched: MatchKind::Alias { alias: alias.clone() } })
            }
            // ③ Category disambiguation.
            CompiledTarget::Category(category) => {
                let Some(from) = position else {
                    debug!(%key, %category, "category match without a position fix");
                    return Err(ResolveError::PositionRequired { category: category.clone() });
                };
                let (node, distance) = nearest_instance(graph, solver, category, from)
                    .ok_or_else(|| ResolveError::NoReachableInstance { category: category.clone() })?;
                debug!(%key, %category, id = graph.name(node), distance, "nearest instance");
                Ok(Resolution {
                    node,
                    key,
                    matched: MatchKind::Nearest { category: category.clone(), distance },
                })
            }
        }
    }

    fn alias_matches(&self, input: &Normalized, alias: &Normalized) -> bool {
        match self.matching {
            AliasMatching::TokenBoundary => input.contains_words(alias),
            AliasMatching::Substring => input.contains_key(alias),
        }
    }
}

/// The instance of `category` with the shortest path from `from`.  Ties go to
/// the earliest-declared instance; unreachable instances never win.
fn nearest_instance(
    graph:    &LocationGraph,
    solver:   &dyn PathSolver,
    category: &Category,
    from:     NodeId,
) -> Option<(NodeId, f64)> {
    let mut best: Option<(NodeId, f64)> = None;
    for candidate in graph.instances_of(category) {
        let distance = solver.distance(graph, from, candidate);
        debug!(id = graph.name(candidate), distance, "candidate instance");
        if distance.is_finite() && best.is_none_or(|(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }
    best
}
