//! Synonym table: canonical targets and their alias phrases, in declared
//! order.
//!
//! A target is either a single node (`MainGateway`) or a whole category
//! (`category:staircase`).  Declared order matters: the resolver selects the
//! first entry whose aliases match, so concrete instances ("stairs 2") should
//! be declared before the category they belong to ("stairs").

use std::fmt;
use std::str::FromStr;

use wf_core::Category;

/// Prefix that marks a category target in its textual form.
pub const CATEGORY_PREFIX: &str = "category:";

// ── SynonymTarget ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SynonymTarget {
    /// A concrete node, by canonical identifier.
    Node(String),
    /// Every node carrying this category tag; resolved to the nearest one.
    Category(Category),
}

impl FromStr for SynonymTarget {
    type Err = std::convert::Infallible;

    /// `"category:<tag>"` names a category, anything else a node id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.strip_prefix(CATEGORY_PREFIX) {
            Some(tag) => SynonymTarget::Category(Category::parse(tag)),
            None => SynonymTarget::Node(s.to_owned()),
        })
    }
}

impl fmt::Display for SynonymTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynonymTarget::Node(id) => f.write_str(id),
            SynonymTarget::Category(c) => write!(f, "{CATEGORY_PREFIX}{c}"),
        }
    }
}

// ── SynonymTable ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct SynonymEntry {
    pub target:  SynonymTarget,
    pub aliases: Vec<String>,
}

/// Ordered list of synonym entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynonymTable {
    entries: Vec<SynonymEntry>,
}

impl SynonymTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append aliases for `target`.
    ///
    /// A target that already has an entry keeps its original position; the
    /// new aliases are added to the end of its list.
    pub fn insert<I, S>(&mut self, target: SynonymTarget, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let aliases = aliases.into_iter().map(Into::into);
        match self.entries.iter_mut().find(|e| e.target == target) {
            Some(entry) => entry.aliases.extend(aliases),
            None => self.entries.push(SynonymEntry { target, aliases: aliases.collect() }),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with<I, S>(mut self, target: &str, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Ok(target) = target.parse::<SynonymTarget>();
        self.insert(target, aliases);
        self
    }

    /// Build a table from `(canonical, alias)` rows; row order is declared
    /// order.
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = Self::new();
        for (canonical, alias) in rows {
            let Ok(target) = canonical.parse::<SynonymTarget>();
            table.insert(target, [alias]);
        }
        table
    }

    pub fn entries(&self) -> &[SynonymEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<SynonymEntry> for SynonymTable {
    /// Merge entries; aliases for an existing target are appended to it.
    fn extend<I: IntoIterator<Item = SynonymEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry.target, entry.aliases);
        }
    }
}

impl IntoIterator for SynonymTable {
    type Item = SynonymEntry;
    type IntoIter = std::vec::IntoIter<SynonymEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
