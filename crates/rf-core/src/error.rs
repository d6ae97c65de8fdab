//! # Error Types
//!
//! Building is total except for number parsing. The remaining variants are
//! raised only under the strict build policy or when the host hands over a
//! parameter that cannot be decoded.

use thiserror::Error;

/// Failure to build a value from a field definition.
///
/// A failure anywhere inside a nested object or array aborts the build of
/// the enclosing top-level field. There is no partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A `number` field's text does not parse as a finite number.
    #[error("field \"{field}\" value is not a number")]
    InvalidNumber {
        /// Field name, empty when unnamed.
        field: String,
        /// The offending raw text.
        value: String,
    },

    /// The declared kind is not one of the five recognized kinds.
    #[error("field \"{field}\" declares unknown type \"{type_name}\"")]
    UnknownType {
        /// Field name, empty when unnamed.
        field: String,
        /// The discriminator text as supplied.
        type_name: String,
    },

    /// A definition is nested deeper than the schema permits.
    #[error("field \"{field}\" is nested at depth {depth}, beyond the maximum of {max}")]
    DepthExceeded {
        /// Field name, empty when unnamed.
        field: String,
        /// Depth of the offending definition.
        depth: u32,
        /// The configured maximum.
        max: u32,
    },

    /// The host-supplied fields parameter could not be decoded.
    #[error("malformed fields parameter: {reason}")]
    MalformedParameter {
        /// Decoder message.
        reason: String,
    },
}

impl BuildError {
    /// Whether this is the number validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidNumber { .. })
    }
}

impl From<serde_json::Error> for BuildError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedParameter {
            reason: err.to_string(),
        }
    }
}
