//! `wf-resolve` — turn what a pedestrian says into a destination node.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`normalize`] | `Normalizer`, `Normalized`                               |
//! | [`synonyms`]  | `SynonymTarget`, `SynonymEntry`, `SynonymTable`          |
//! | [`resolver`]  | `UtteranceResolver`, `Resolution`, `MatchKind`           |
//! | [`error`]     | `ResolveError`, `ResolveResult<T>`                       |
//!
//! Resolution either yields exactly one existing node or a typed
//! [`ResolveError`]; it never returns an alias or a category tag.

pub mod error;
pub mod normalize;
pub mod resolver;
pub mod synonyms;


pub use error::{ResolveError, ResolveResult};
pub use normalize::{Normalized, Normalizer};
pub use resolver::{MatchKind, Resolution, UtteranceResolver};
pub use synonyms::{SynonymEntry, SynonymTable, SynonymTarget, CATEGORY_PREFIX};
