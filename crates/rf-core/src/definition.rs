//! # Field Definitions
//!
//! A `FieldDefinition` is one authored unit: a declared kind plus either a
//! literal (`value`, `valueBool`) or nested children (`objectFields`,
//! `arrayItems`). Instances are produced by the host from form state, so
//! every slot is optional and loosely typed on the wire.
//!
//! Only the slot matching the declared kind matters. The others may hold
//! leftovers from earlier edits and are ignored by the builder.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::container::Container;
use crate::kind::{Discriminator, DiscriminatorKey};

/// Default of the `valueBool` slot. Shared by schema generation and building
/// so an untouched boolean field builds to what the form displayed.
pub const VALUE_BOOL_DEFAULT: bool = true;

/// One field definition as supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Declared kind for top-level fields and object members.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub type_name: Option<String>,

    /// Declared kind for array items.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    /// Output key. Meaningful for top-level fields and object members only.
    #[serde(default, deserialize_with = "lenient_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Raw text for `string` and `number` kinds.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Literal for the `boolean` kind.
    // Unlike plain truthiness, the text "false" decodes to false.
    #[serde(default, deserialize_with = "lenient_bool", skip_serializing_if = "Option::is_none")]
    pub value_bool: Option<bool>,

    /// Members of an `object` kind, grouped under `field`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_fields: Option<Container>,

    /// Items of an `array` kind, grouped under `item`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_items: Option<Container>,
}

impl FieldDefinition {
    /// Raw text stored in the discriminator slot named by `key`.
    pub fn raw_discriminator(&self, key: DiscriminatorKey) -> Option<&str> {
        match key {
            DiscriminatorKey::Type => self.type_name.as_deref(),
            DiscriminatorKey::ItemType => self.item_type.as_deref(),
        }
    }

    /// Declared kind read from the slot named by `key`.
    pub fn discriminator(&self, key: DiscriminatorKey) -> Discriminator {
        Discriminator::resolve(self.raw_discriminator(key))
    }

    /// The name, or the empty string when unnamed.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Whether the definition carries a non-empty name.
    pub fn has_name(&self) -> bool {
        !self.display_name().is_empty()
    }

    /// The raw `value` text, or the empty string when absent.
    pub fn value_text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// `valueBool`, falling back to [`VALUE_BOOL_DEFAULT`].
    pub fn value_bool_or_default(&self) -> bool {
        self.value_bool.unwrap_or(VALUE_BOOL_DEFAULT)
    }
}

/// Text slots accept scalars of any JSON type. Structured values and null
/// read as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Like [`lenient_text`], but falsy scalars (`false`, `0`, `-0`) read as
/// absent, so they never become output keys.
fn lenient_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    })
}

/// Boolean slots coerce by truthiness, except that the strings `"true"`
/// and `"false"` mean what they say.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Bool(b) => Some(b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => match s.trim() {
            "false" | "" => Some(false),
            _ => Some(true),
        },
        Value::Array(_) | Value::Object(_) => Some(true),
    })
}
