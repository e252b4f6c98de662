//! Text normalization.
//!
//! Utterances, canonical identifiers and aliases all pass through the same
//! [`Normalizer`] before any comparison:
//!
//! 1. lower-case;
//! 2. split on whitespace, dropping every other non-alphanumeric character
//!    (`"men's"` → `"mens"`);
//! 3. remove filler phrases wherever they occur as whole-word runs, longest
//!    phrase first;
//! 4. replace whole-word homophones (`"and"` → `"n"`);
//! 5. the canonical key is the concatenation of what is left.
//!
//! So `"I want to go to Main Gateway"`, `"go to main gateway"` and the
//! identifier `MainGateway` all share the key `maingateway`.

use rustc_hash::FxHashMap;

use wf_core::NormalizerConfig;

/// Output of [`Normalizer::normalize`]: the surviving words and their
/// concatenation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Normalized {
    tokens: Vec<String>,
    key:    String,
}

impl Normalized {
    fn from_tokens(tokens: Vec<String>) -> Self {
        let key = tokens.concat();
        Self { tokens, key }
    }

    /// The canonical comparison key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// `true` if `other`'s words appear contiguously in `self`, or the two
    /// keys are identical (`"maingateway"` typed without a space still equals
    /// `"main gateway"`).
    pub fn contains_words(&self, other: &Normalized) -> bool {
        if other.is_empty() {
            return false;
        }
        self.key == other.key
            || self
                .tokens
                .windows(other.tokens.len())
                .any(|w| w == other.tokens.as_slice())
    }

    /// `true` if `other`'s key occurs anywhere inside `self`'s key.
    pub fn contains_key(&self, other: &Normalized) -> bool {
        !other.is_empty() && self.key.contains(other.key.as_str())
    }
}

/// Deterministic, configuration-driven text normalizer.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Filler phrases as word sequences, longest first.
    fillers: Vec<Vec<String>>,
    homophones: FxHashMap<String, String>,
}

impl Normalizer {
    pub fn new(config: &NormalizerConfig) -> Self {
        let mut fillers: Vec<Vec<String>> = config
            .fillers
            .iter()
            .map(|f| tokenize(f))
            .filter(|t| !t.is_empty())
            .collect();
        // Stable: equal-length phrases keep their configured order.
        fillers.sort_by_key(|t| std::cmp::Reverse(t.len()));

        let mut homophones = FxHashMap::default();
        for (heard, meant) in &config.homophones {
            let heard = tokenize(heard).concat();
            let meant = tokenize(meant).concat();
            if !heard.is_empty() {
                homophones.entry(heard).or_insert(meant);
            }
        }

        Self { fillers, homophones }
    }

    pub fn normalize(&self, text: &str) -> Normalized {
        let raw = tokenize(text);

        let mut kept: Vec<String> = Vec::with_capacity(raw.len());
        let mut i = 0;
        while i < raw.len() {
            if let Some(filler) = self.fillers.iter().find(|f| raw[i..].starts_with(f.as_slice())) {
                i += filler.len();
                continue;
            }
            kept.push(raw[i].clone());
            i += 1;
        }

        let tokens = kept
            .into_iter()
            .map(|t| match self.homophones.get(&t) {
                Some(meant) => meant.clone(),
                None => t,
            })
            .filter(|t| !t.is_empty())
            .collect();

        Normalized::from_tokens(tokens)
    }

    /// Shorthand for `normalize(text).key().to_owned()`.
    pub fn key(&self, text: &str) -> String {
        self.normalize(text).key
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&NormalizerConfig::default())
    }
}

/// Lower-case, split on whitespace, strip non-alphanumerics from each word.
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|t| !t.is_empty())
        .collect()
}
