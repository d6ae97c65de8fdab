//! # Container Normalization
//!
//! Nested definitions (`objectFields`, `arrayItems`, and the top-level
//! `fieldsCollection`) reach us in one of two encodings:
//!
//! 1. A sequence of group wrappers, each holding a sub-key (`field` or
//!    `item`) whose value is a single definition or a sequence of them:
//!    `[{"field": [..]}, {"field": {..}}]`
//! 2. A mapping exposing the sub-key directly: `{"field": [..]}`
//!
//! [`flatten`] reduces both to one ordered list. Anything else (null,
//! `false`, numbers, strings) is an empty container.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::definition::FieldDefinition;

/// Sub-key under which a group stores its definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// `field`: object members and top-level fields.
    Field,
    /// `item`: array items.
    Item,
}

impl GroupKey {
    /// Wire name of the sub-key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Item => "item",
        }
    }
}

/// A nested container in either encoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Container {
    /// Sequence of group wrappers.
    Groups(Vec<GroupSlot>),
    /// Mapping exposing the sub-key directly.
    Direct(Group),
    /// Any other JSON value. Contributes nothing.
    Ignored(Value),
}

/// One element of a group sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GroupSlot {
    /// A mapping, possibly holding a sub-key.
    Group(Group),
    /// A non-mapping element. Skipped.
    Ignored(Value),
}

/// A group wrapper. Only the sub-key matching the container is read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Group {
    /// Definitions stored under `field`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<OneOrMany>,
    /// Definitions stored under `item`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<OneOrMany>,
}

/// A sub-key value: a single definition or a sequence of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OneOrMany {
    /// Sequence form.
    Many(Vec<FieldDefinition>),
    /// Singleton form.
    One(Box<FieldDefinition>),
}

impl OneOrMany {
    /// The definitions in order, regardless of form.
    pub fn as_slice(&self) -> &[FieldDefinition] {
        match self {
            Self::Many(defs) => defs,
            Self::One(def) => std::slice::from_ref(def.as_ref()),
        }
    }

    fn from_value(value: Value) -> Result<Option<Self>, serde_json::Error> {
        match value {
            Value::Array(entries) => entries
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<_>, _>>()
                .map(|defs| Some(Self::Many(defs))),
            Value::Object(map) => serde_json::from_value(Value::Object(map))
                .map(|def| Some(Self::One(Box::new(def)))),
            _ => Ok(None),
        }
    }
}

impl Group {
    /// Definitions stored under `key`, if present.
    pub fn get(&self, key: GroupKey) -> Option<&OneOrMany> {
        match key {
            GroupKey::Field => self.field.as_ref(),
            GroupKey::Item => self.item.as_ref(),
        }
    }

    fn from_map(mut map: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let mut take = |key: GroupKey| match map.remove(key.as_str()) {
            Some(value) => OneOrMany::from_value(value),
            None => Ok(None),
        };
        Ok(Self {
            field: take(GroupKey::Field)?,
            item: take(GroupKey::Item)?,
        })
    }
}

impl GroupSlot {
    /// The group, if this slot holds one.
    pub fn group(&self) -> Option<&Group> {
        match self {
            Self::Group(group) => Some(group),
            Self::Ignored(_) => None,
        }
    }
}

impl Container {
    /// An empty direct-mapping container.
    pub fn empty() -> Self {
        Self::Direct(Group::default())
    }

    /// Decode a container from a JSON value in either encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if a definition found under a sub-key is not a
    /// valid [`FieldDefinition`] (for example a `null` inside a sequence).
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Array(slots) => slots
                .into_iter()
                .map(|slot| match slot {
                    Value::Object(map) => Group::from_map(map).map(GroupSlot::Group),
                    other => Ok(GroupSlot::Ignored(other)),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Groups),
            Value::Object(map) => Group::from_map(map).map(Self::Direct),
            other => Ok(Self::Ignored(other)),
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'de> Deserialize<'de> for Container {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Self::from_value(raw).map_err(D::Error::custom)
    }
}

/// Collect every definition reachable from `container` under `key`, in
/// order. An absent container yields nothing.
pub fn flatten(container: Option<&Container>, key: GroupKey) -> Vec<&FieldDefinition> {
    match container {
        None | Some(Container::Ignored(_)) => Vec::new(),
        Some(Container::Groups(slots)) => slots
            .iter()
            .filter_map(GroupSlot::group)
            .filter_map(|group| group.get(key))
            .flat_map(OneOrMany::as_slice)
            .collect(),
        Some(Container::Direct(group)) => group
            .get(key)
            .map(|entries| entries.as_slice().iter().collect())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn container(value: Value) -> Container {
        serde_json::from_value(value).unwrap()
    }

    fn names(defs: &[&FieldDefinition]) -> Vec<String> {
        defs.iter().map(|d| d.display_name().to_string()).collect()
    }

    #[test]
    fn absent_container_is_empty() {
        assert!(flatten(None, GroupKey::Field).is_empty());
    }

    #[test]
    fn falsy_containers_are_empty() {
        for raw in [json!(null), json!(false), json!(0), json!(""), json!("text")] {
            let c = container(raw);
            assert!(flatten(Some(&c), GroupKey::Field).is_empty());
        }
    }

    #[test]
    fn direct_mapping_with_sequence() {
        let c = container(json!({"field": [{"name": "a"}, {"name": "b"}]}));
        assert_eq!(names(&flatten(Some(&c), GroupKey::Field)), ["a", "b"]);
    }

    #[test]
    fn direct_mapping_with_singleton() {
        let c = container(json!({"field": {"name": "only"}}));
        assert_eq!(names(&flatten(Some(&c), GroupKey::Field)), ["only"]);
    }

    #[test]
    fn group_sequence_concatenates_in_order() {
        let c = container(json!([
            {"field": [{"name": "a"}, {"name": "b"}]},
            {"field": {"name": "c"}},
            {"field": [{"name": "d"}]}
        ]));
        assert_eq!(names(&flatten(Some(&c), GroupKey::Field)), ["a", "b", "c", "d"]);
    }

    #[test]
    fn both_encodings_flatten_identically() {
        let wrapped = container(json!([{"field": {"name": "a"}}, {"field": {"name": "b"}}]));
        let direct = container(json!({"field": [{"name": "a"}, {"name": "b"}]}));
        assert_eq!(
            flatten(Some(&wrapped), GroupKey::Field),
            flatten(Some(&direct), GroupKey::Field)
        );
    }

    #[test]
    fn group_sequence_skips_non_groups_and_missing_keys() {
        let c = container(json!([
            null,
            7,
            {"other": [{"name": "x"}]},
            {"field": null},
            {"field": [{"name": "kept"}]}
        ]));
        assert_eq!(names(&flatten(Some(&c), GroupKey::Field)), ["kept"]);
    }

    #[test]
    fn only_the_requested_sub_key_is_read() {
        let c = container(json!({"field": [{"name": "f"}], "item": [{"name": "i"}]}));
        assert_eq!(names(&flatten(Some(&c), GroupKey::Item)), ["i"]);
        assert_eq!(names(&flatten(Some(&c), GroupKey::Field)), ["f"]);
    }

    #[test]
    fn null_definition_inside_sequence_is_rejected() {
        let err = serde_json::from_value::<Container>(json!({"field": [null]}));
        assert!(err.is_err());
    }

    #[test]
    fn serializes_back_to_the_same_shape() {
        let raw = json!([{"item": [{"itemType": "string", "value": "p"}]}]);
        assert_eq!(serde_json::to_value(container(raw.clone())).unwrap(), raw);
    }

    #[test]
    fn empty_container_serializes_as_empty_mapping() {
        assert_eq!(serde_json::to_value(Container::empty()).unwrap(), json!({}));
    }
}
