//! # Descriptor Generation
//!
//! Builds the descriptors of one field definition. The list always holds
//! the discriminator, the literal slots and (for named contexts) `name`.
//! Below [`MAX_DEPTH`] it also holds the two container branches, each
//! wrapping a recursive call one level deeper:
//!
//! | Branch         | Sub-key | Child discriminator key |
//! |----------------|---------|-------------------------|
//! | `objectFields` | `field` | `type`                  |
//! | `arrayItems`   | `item`  | `itemType`              |

use rf_core::{Depth, DiscriminatorKey, FieldKind, GroupKey, MAX_DEPTH, VALUE_BOOL_DEFAULT};
use serde_json::{Map, Value};

use crate::descriptor::{
    CollectionGroup, Control, DisplayOptions, FieldDescriptor, Level, NodeDefaults,
    NodeDescription, OptionValue, TypeOptions,
};

/// Slot holding an object's members.
pub const OBJECT_FIELDS: &str = "objectFields";

/// Slot holding an array's items.
pub const ARRAY_ITEMS: &str = "arrayItems";

/// Top-level node parameter holding the field list.
pub const FIELDS_COLLECTION: &str = "fieldsCollection";

/// Descriptors for a field definition at `depth` whose kind is stored under `key`.
///
/// Total for every depth. At and beyond [`MAX_DEPTH`] the object and array
/// branches are omitted, which ends the recursion.
pub fn generate(depth: Depth, key: DiscriminatorKey) -> Vec<FieldDescriptor> {
    tracing::trace!(depth = depth.get(), key = %key, max = MAX_DEPTH, "generating field level");

    let mut defs = Vec::with_capacity(6);
    defs.push(discriminator(key));
    if key.is_named() {
        defs.push(name(depth));
    }
    defs.push(value(key));
    defs.push(value_bool(key));

    if depth.can_nest() {
        let child = depth.next();
        defs.push(branch(
            "Object Fields",
            OBJECT_FIELDS,
            FieldKind::Object,
            key,
            GroupKey::Field,
            Level {
                depth: child,
                key: DiscriminatorKey::Type,
            },
        ));
        defs.push(branch(
            "Array Items",
            ARRAY_ITEMS,
            FieldKind::Array,
            key,
            GroupKey::Item,
            Level {
                depth: child,
                key: DiscriminatorKey::ItemType,
            },
        ));
    }
    defs
}

/// The node description with the root field list as its only parameter.
pub fn node_description() -> NodeDescription {
    let root = Level::root();
    NodeDescription {
        display_name: "Rich Fields".to_string(),
        name: "richFields".to_string(),
        icon: "fa:code".to_string(),
        group: vec!["transform".to_string()],
        version: 1,
        description: "Build complex fields (object/array) via UI".to_string(),
        defaults: NodeDefaults {
            name: "Rich Fields".to_string(),
        },
        inputs: vec!["main".to_string()],
        outputs: vec!["main".to_string()],
        properties: vec![FieldDescriptor {
            display_name: "Fields".to_string(),
            name: FIELDS_COLLECTION.to_string(),
            control: Control::FixedCollection {
                type_options: TypeOptions {
                    multiple_values: true,
                },
                default: Map::new(),
                options: vec![group(GroupKey::Field, root)],
            },
            description: None,
            display_options: None,
        }],
    }
}

fn discriminator(key: DiscriminatorKey) -> FieldDescriptor {
    FieldDescriptor {
        display_name: "Type".to_string(),
        name: key.as_str().to_string(),
        control: Control::Options {
            options: FieldKind::ALL
                .iter()
                .map(|kind| OptionValue {
                    name: kind.label().to_string(),
                    value: Value::String(kind.as_str().to_string()),
                })
                .collect(),
            default: Value::String(FieldKind::DEFAULT.as_str().to_string()),
        },
        description: None,
        display_options: None,
    }
}

fn name(depth: Depth) -> FieldDescriptor {
    FieldDescriptor {
        display_name: "Name".to_string(),
        name: "name".to_string(),
        control: Control::String {
            default: String::new(),
        },
        // Only the root level names keys of the output record itself.
        description: (depth == Depth::ROOT)
            .then(|| "Key of the field in the output object".to_string()),
        display_options: None,
    }
}

fn value(key: DiscriminatorKey) -> FieldDescriptor {
    FieldDescriptor {
        display_name: "Value".to_string(),
        name: "value".to_string(),
        control: Control::String {
            default: String::new(),
        },
        description: None,
        display_options: Some(DisplayOptions::shown_for(
            key,
            &[FieldKind::String, FieldKind::Number],
        )),
    }
}

fn value_bool(key: DiscriminatorKey) -> FieldDescriptor {
    FieldDescriptor {
        display_name: "Value".to_string(),
        name: "valueBool".to_string(),
        control: Control::Options {
            options: [true, false]
                .into_iter()
                .map(|b| OptionValue {
                    name: b.to_string(),
                    value: Value::Bool(b),
                })
                .collect(),
            default: Value::Bool(VALUE_BOOL_DEFAULT),
        },
        description: None,
        display_options: Some(DisplayOptions::shown_for(key, &[FieldKind::Boolean])),
    }
}

fn branch(
    display_name: &str,
    slot: &str,
    kind: FieldKind,
    key: DiscriminatorKey,
    group_key: GroupKey,
    level: Level,
) -> FieldDescriptor {
    FieldDescriptor {
        display_name: display_name.to_string(),
        name: slot.to_string(),
        control: Control::FixedCollection {
            type_options: TypeOptions {
                multiple_values: true,
            },
            default: Map::new(),
            options: vec![group(group_key, level)],
        },
        description: None,
        display_options: Some(DisplayOptions::shown_for(key, &[kind])),
    }
}

fn group(group_key: GroupKey, level: Level) -> CollectionGroup {
    let display_name = match group_key {
        GroupKey::Field => "Field",
        GroupKey::Item => "Item",
    };
    CollectionGroup {
        name: group_key.as_str().to_string(),
        display_name: display_name.to_string(),
        values: generate(level.depth, level.key),
        level,
    }
}
