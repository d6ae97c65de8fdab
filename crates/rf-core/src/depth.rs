//! # Nesting Depth
//!
//! Field definitions nest through `objectFields` and `arrayItems`. Depth 1
//! is the top-level field list; every container step adds one. Schema
//! generation stops offering containers at [`MAX_DEPTH`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Deepest level at which a definition may exist. Definitions at this
/// depth cannot declare nested object or array children.
pub const MAX_DEPTH: u32 = 10;

/// One-based nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Depth(u32);

impl Depth {
    /// The top-level field list.
    pub const ROOT: Depth = Depth(1);

    /// Returns `None` for zero; depths are one-based.
    pub fn new(level: u32) -> Option<Self> {
        (level >= 1).then_some(Self(level))
    }

    /// The numeric level.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// The level of this definition's children.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Whether a definition at this depth may declare nested children.
    pub fn can_nest(&self) -> bool {
        self.0 < MAX_DEPTH
    }

    /// Whether this depth lies past the bound the schema allows.
    pub fn exceeds_max(&self) -> bool {
        self.0 > MAX_DEPTH
    }
}

impl Default for Depth {
    fn default() -> Self {
        Self::ROOT
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
