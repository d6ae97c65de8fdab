//! # Value Builder
//!
//! Interprets one field definition into a JSON value:
//!
//! | Kind      | Result                                                      |
//! |-----------|-------------------------------------------------------------|
//! | `string`  | `value` text, empty when absent                             |
//! | `number`  | `value` parsed by [`parse_number`]; failure is an error     |
//! | `boolean` | `valueBool`, defaulting to [`rf_core::VALUE_BOOL_DEFAULT`]  |
//! | `array`   | each `arrayItems` entry built under `itemType`, in order    |
//! | `object`  | each `objectFields` entry built under `type`, keyed by name |
//!
//! Object members without a name land under the empty key. A later member
//! with a repeated name replaces the earlier value.
//!
//! ## Policy
//!
//! The schema never offers an unrecognized kind nor nesting past
//! [`MAX_DEPTH`], but hand-written input can contain both. [`BuildPolicy`]
//! decides whether such input falls back silently or is rejected.

use rf_core::{
    flatten, BuildError, Depth, Discriminator, DiscriminatorKey, FieldDefinition, FieldKind,
    GroupKey, MAX_DEPTH,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::number::parse_number;

/// Handling of discriminators outside the five recognized kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownTypes {
    /// Return the raw `value` text (empty when absent).
    #[default]
    Fallback,
    /// Fail with [`BuildError::UnknownType`].
    Reject,
}

/// Rules for input the schema would not have produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildPolicy {
    /// What to do with unrecognized kinds.
    pub unknown_types: UnknownTypes,
    /// Fail with [`BuildError::DepthExceeded`] past [`MAX_DEPTH`].
    pub enforce_depth: bool,
}

impl BuildPolicy {
    /// Fall back on unknown kinds, no depth ceiling.
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Reject unknown kinds and over-deep nesting.
    pub fn strict() -> Self {
        Self {
            unknown_types: UnknownTypes::Reject,
            enforce_depth: true,
        }
    }
}

/// Builds JSON values from field definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueBuilder {
    policy: BuildPolicy,
}

impl ValueBuilder {
    /// A builder applying `policy`.
    pub fn new(policy: BuildPolicy) -> Self {
        Self { policy }
    }

    /// The active policy.
    pub fn policy(&self) -> BuildPolicy {
        self.policy
    }

    /// Build a top-level definition whose kind is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidNumber`] if this definition or any nested
    /// one is a `number` whose text does not parse. Under the strict policy
    /// also returns [`BuildError::UnknownType`] and [`BuildError::DepthExceeded`].
    pub fn build(&self, def: &FieldDefinition, key: DiscriminatorKey) -> Result<Value, BuildError> {
        self.build_at(def, key, Depth::ROOT)
    }

    /// Build a definition located at `depth`.
    ///
    /// # Errors
    ///
    /// See [`ValueBuilder::build`].
    pub fn build_at(
        &self,
        def: &FieldDefinition,
        key: DiscriminatorKey,
        depth: Depth,
    ) -> Result<Value, BuildError> {
        if self.policy.enforce_depth && depth.exceeds_max() {
            return Err(BuildError::DepthExceeded {
                field: def.display_name().to_string(),
                depth: depth.get(),
                max: MAX_DEPTH,
            });
        }

        match def.discriminator(key) {
            Discriminator::Known(kind) => self.build_kind(kind, def, depth),
            Discriminator::Unrecognized(type_name) => self.build_unrecognized(def, type_name),
        }
    }

    fn build_kind(
        &self,
        kind: FieldKind,
        def: &FieldDefinition,
        depth: Depth,
    ) -> Result<Value, BuildError> {
        match kind {
            FieldKind::String => Ok(Value::String(def.value_text().to_string())),
            FieldKind::Number => parse_number(def.value_text())
                .map(Value::Number)
                .ok_or_else(|| BuildError::InvalidNumber {
                    field: def.display_name().to_string(),
                    value: def.value_text().to_string(),
                }),
            FieldKind::Boolean => Ok(Value::Bool(def.value_bool_or_default())),
            FieldKind::Array => {
                let items = flatten(def.array_items.as_ref(), GroupKey::Item);
                tracing::trace!(depth = depth.get(), items = items.len(), "building array");
                items
                    .into_iter()
                    .map(|item| self.build_at(item, DiscriminatorKey::ItemType, depth.next()))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
            FieldKind::Object => {
                let members = flatten(def.object_fields.as_ref(), GroupKey::Field);
                tracing::trace!(depth = depth.get(), members = members.len(), "building object");
                let mut object = Map::with_capacity(members.len());
                for member in members {
                    let value = self.build_at(member, DiscriminatorKey::Type, depth.next())?;
                    object.insert(member.display_name().to_string(), value);
                }
                Ok(Value::Object(object))
            }
        }
    }

    fn build_unrecognized(
        &self,
        def: &FieldDefinition,
        type_name: String,
    ) -> Result<Value, BuildError> {
        match self.policy.unknown_types {
            UnknownTypes::Fallback => {
                tracing::warn!(
                    field = def.display_name(),
                    type_name = %type_name,
                    "unrecognized field type; using raw value"
                );
                Ok(Value::String(def.value_text().to_string()))
            }
            UnknownTypes::Reject => Err(BuildError::UnknownType {
                field: def.display_name().to_string(),
                type_name,
            }),
        }
    }
}
