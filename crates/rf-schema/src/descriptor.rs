//! # Field Descriptors
//!
//! Serializable description of one form control, in the camelCase property
//! format the host's form renderer reads:
//!
//! ```json
//! {
//!   "displayName": "Value",
//!   "name": "valueBool",
//!   "type": "options",
//!   "options": [{"name": "true", "value": true}, {"name": "false", "value": false}],
//!   "default": true,
//!   "displayOptions": {"show": {"type": ["boolean"]}}
//! }
//! ```

use std::collections::BTreeMap;

use rf_core::{Depth, DiscriminatorKey, FieldKind};
use serde::Serialize;
use serde_json::{Map, Value};

/// One form control.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Label shown to the author.
    pub display_name: String,
    /// Key under which the control's value is stored.
    pub name: String,
    /// Control type and its type-specific settings.
    #[serde(flatten)]
    pub control: Control,
    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Visibility condition. `None` means always shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
}

/// Control type, serialized as the `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Control {
    /// Free text input.
    String {
        /// Initial text.
        default: String,
    },
    /// Choice from a fixed list.
    Options {
        /// Available choices in display order.
        options: Vec<OptionValue>,
        /// Initially selected value.
        default: Value,
    },
    /// Repeatable group of nested controls.
    FixedCollection {
        /// Collection behaviour.
        #[serde(rename = "typeOptions")]
        type_options: TypeOptions,
        /// Initial content.
        default: Map<String, Value>,
        /// Groups the author may add.
        options: Vec<CollectionGroup>,
    },
}

/// A labelled choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionValue {
    /// Label.
    pub name: String,
    /// Stored value.
    pub value: Value,
}

/// Settings of a fixed collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeOptions {
    /// Whether the author may add the group more than once.
    pub multiple_values: bool,
}

/// A group inside a fixed collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionGroup {
    /// Sub-key under which the group's entries are stored.
    pub name: String,
    /// Label.
    pub display_name: String,
    /// Controls of one entry.
    pub values: Vec<FieldDescriptor>,
    /// Where the entries sit in the nesting. Not part of the wire format.
    #[serde(skip)]
    pub level: Level,
}

/// Depth and discriminator key of a descriptor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Level {
    /// Nesting depth of the described definitions.
    pub depth: Depth,
    /// Slot holding the described definitions' kind.
    pub key: DiscriminatorKey,
}

impl Level {
    /// The top-level field list.
    pub fn root() -> Self {
        Self {
            depth: Depth::ROOT,
            key: DiscriminatorKey::Type,
        }
    }

    /// Stable identifier, e.g. `type_1` or `itemType_4`.
    pub fn id(&self) -> String {
        format!("{}_{}", self.key, self.depth)
    }
}

/// Visibility condition: show when the discriminator holds one of the kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayOptions {
    /// Discriminator key name mapped to the kinds that reveal the control.
    pub show: BTreeMap<String, Vec<FieldKind>>,
}

impl DisplayOptions {
    /// Show when the slot named by `key` holds one of `kinds`.
    pub fn shown_for(key: DiscriminatorKey, kinds: &[FieldKind]) -> Self {
        let mut show = BTreeMap::new();
        show.insert(key.as_str().to_string(), kinds.to_vec());
        Self { show }
    }

    /// Whether a definition of `kind` stored under `key` reveals the control.
    pub fn applies_to(&self, key: DiscriminatorKey, kind: FieldKind) -> bool {
        self.show
            .get(key.as_str())
            .is_some_and(|kinds| kinds.contains(&kind))
    }
}

impl FieldDescriptor {
    /// The control's default as a JSON value.
    pub fn default_value(&self) -> Value {
        match &self.control {
            Control::String { default } => Value::String(default.clone()),
            Control::Options { default, .. } => default.clone(),
            Control::FixedCollection { default, .. } => Value::Object(default.clone()),
        }
    }

    /// Nested group by sub-key, for fixed collections.
    pub fn group(&self, name: &str) -> Option<&CollectionGroup> {
        match &self.control {
            Control::FixedCollection { options, .. } => options.iter().find(|g| g.name == name),
            Control::String { .. } | Control::Options { .. } => None,
        }
    }

    /// Whether the control is visible for a definition of `kind` under `key`.
    pub fn is_shown(&self, key: DiscriminatorKey, kind: FieldKind) -> bool {
        self.display_options
            .as_ref()
            .map_or(true, |opts| opts.applies_to(key, kind))
    }
}

/// Look up a descriptor by name.
pub fn find<'a>(descriptors: &'a [FieldDescriptor], name: &str) -> Option<&'a FieldDescriptor> {
    descriptors.iter().find(|d| d.name == name)
}

/// Names of the descriptors in order.
pub fn names(descriptors: &[FieldDescriptor]) -> Vec<&str> {
    descriptors.iter().map(|d| d.name.as_str()).collect()
}

/// Default node name shown in the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeDefaults {
    /// Node label.
    pub name: String,
}

/// Full node description handed to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    /// Label in the node palette.
    pub display_name: String,
    /// Internal node identifier.
    pub name: String,
    /// Icon reference.
    pub icon: String,
    /// Palette groups.
    pub group: Vec<String>,
    /// Node version.
    pub version: u32,
    /// One-line summary.
    pub description: String,
    /// Defaults applied when the node is created.
    pub defaults: NodeDefaults,
    /// Input connection types.
    pub inputs: Vec<String>,
    /// Output connection types.
    pub outputs: Vec<String>,
    /// Top-level parameters.
    pub properties: Vec<FieldDescriptor>,
}
