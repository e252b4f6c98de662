//! Node classification: user-facing location vs. geometry-only waypoint, and
//! the optional category tag that groups interchangeable locations.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

// ── NodeKind ──────────────────────────────────────────────────────────────────

/// Whether a node is something a pedestrian can ask for by name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NodeKind {
    /// A named place (shop, gateway, staircase …).  Addressable by voice.
    #[default]
    Location,
    /// A corridor bend or junction.  Only shapes the path geometry.
    Waypoint,
}

impl NodeKind {
    #[inline]
    pub fn is_location(self) -> bool {
        matches!(self, NodeKind::Location)
    }
}

impl FromStr for NodeKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "location" | "node" => Ok(NodeKind::Location),
            "waypoint" | "turnpoint" => Ok(NodeKind::Waypoint),
            other => Err(CoreError::Parse(format!(
                "invalid node kind {other:?}: expected \"location\" or \"waypoint\""
            ))),
        }
    }
}

// ── Category ──────────────────────────────────────────────────────────────────

/// Category tag stored per node.
///
/// Instances sharing a tag are interchangeable: "nearest staircase" resolves
/// to whichever `Staircase` node is closest along the graph.  Tags the engine
/// has no special meaning for are kept in `Other`, folded the same way as the
/// built-in ones, so a dataset can introduce new groups (`"Lift"`, `"ATM"`)
/// without a code change and without every spelling having to agree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum Category {
    Staircase,
    Gateway,
    ToiletMale,
    ToiletFemale,
    /// A toilet with no gender split.
    Toilet,
    /// Folded tag: lower-case, alphanumerics only.
    Other(String),
}

impl Category {
    /// Landmarks are always announced during narration, even when the path
    /// runs straight through them.
    pub fn is_landmark(&self) -> bool {
        matches!(
            self,
            Category::Staircase
                | Category::Gateway
                | Category::ToiletMale
                | Category::ToiletFemale
                | Category::Toilet
        )
    }

    /// Parse a tag, folding case and separators: `"toilet-male"`,
    /// `"Toilet_Male"` and `"MaleToilet"` are the same category, as are
    /// `"ATM"` and `"atm"`.
    pub fn parse(tag: &str) -> Category {
        let folded: String = tag
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "staircase" | "stairs" | "stair" => Category::Staircase,
            "gateway" | "gate" => Category::Gateway,
            "toiletmale" | "maletoilet" => Category::ToiletMale,
            "toiletfemale" | "femaletoilet" => Category::ToiletFemale,
            "toilet" | "toilets" | "restroom" | "washroom" => Category::Toilet,
            _ => Category::Other(folded),
        }
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::parse(s))
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::parse(&s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Staircase    => f.write_str("Staircase"),
            Category::Gateway      => f.write_str("Gateway"),
            Category::ToiletMale   => f.write_str("Toilet-Male"),
            Category::ToiletFemale => f.write_str("Toilet-Female"),
            Category::Toilet       => f.write_str("Toilet"),
            Category::Other(tag)   => f.write_str(tag),
        }
    }
}
