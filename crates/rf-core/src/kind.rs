//! # Value Kinds and Discriminators
//!
//! The declared type of a field definition is one of five kinds. The name
//! of the slot holding that declaration depends on context: `type` for
//! top-level fields and object members, `itemType` for array items.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The declared value type of a field definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Raw text taken from `value`.
    String,
    /// Number parsed from the text in `value`.
    Number,
    /// Boolean taken from `valueBool`.
    Boolean,
    /// Mapping built from `objectFields`.
    Object,
    /// Sequence built from `arrayItems`.
    Array,
}

impl FieldKind {
    /// All kinds in the order they are offered to authors.
    pub const ALL: [FieldKind; 5] = [
        Self::String,
        Self::Number,
        Self::Boolean,
        Self::Object,
        Self::Array,
    ];

    /// Kind assumed when a definition declares nothing.
    pub const DEFAULT: FieldKind = Self::String;

    /// Wire name, as stored in the discriminator slot.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// Human-facing label shown in option lists.
    pub fn label(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Object => "Object",
            Self::Array => "Array",
        }
    }

    /// Returns true for kinds whose value lives in nested children.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discriminator value that is not one of the five kinds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown field kind: \"{0}\"")]
pub struct UnknownFieldKind(pub String);

impl FromStr for FieldKind {
    type Err = UnknownFieldKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownFieldKind(s.to_string()))
    }
}

/// Name of the slot that stores a definition's declared kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscriminatorKey {
    /// `type`: top-level fields and object members. These carry a `name`.
    #[serde(rename = "type")]
    Type,
    /// `itemType`: array items. These are unnamed.
    #[serde(rename = "itemType")]
    ItemType,
}

impl DiscriminatorKey {
    /// Wire name of the slot.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::ItemType => "itemType",
        }
    }

    /// Whether definitions stored under this key carry a `name`.
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Type)
    }
}

impl Default for DiscriminatorKey {
    fn default() -> Self {
        Self::Type
    }
}

impl fmt::Display for DiscriminatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resolved discriminator of one definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discriminator {
    /// One of the five recognized kinds.
    Known(FieldKind),
    /// Anything else the host handed us.
    Unrecognized(String),
}

impl Discriminator {
    /// Resolve a raw slot value. Absent or empty text means [`FieldKind::DEFAULT`].
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self::Known(FieldKind::DEFAULT),
            Some(text) => match text.parse::<FieldKind>() {
                Ok(kind) => Self::Known(kind),
                Err(UnknownFieldKind(other)) => Self::Unrecognized(other),
            },
        }
    }

    /// The recognized kind, if any.
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            Self::Known(kind) => Some(*kind),
            Self::Unrecognized(_) => None,
        }
    }
}
