//! # Orchestration
//!
//! Runs every input record through the builder, in order. For each record
//! the host supplies the top-level field collection; unnamed fields are
//! skipped and the rest are built into the record's new `json` payload.
//!
//! A failed record either becomes `{"error": <message>, "item": <index>}`
//! when the host continues past failures, or ends the batch with a
//! [`NodeApiError`] carrying the original message.

use rf_core::{flatten, BuildError, Container, DiscriminatorKey, GroupKey};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::builder::ValueBuilder;

/// Identity of the node being executed, as reported in fatal errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    /// Node label in the workflow.
    pub name: String,
    /// Node type identifier.
    #[serde(rename = "type", default = "default_node_type")]
    pub node_type: String,
}

fn default_node_type() -> String {
    "richFields".to_string()
}

impl Default for NodeInfo {
    fn default() -> Self {
        Self {
            name: "Rich Fields".to_string(),
            node_type: default_node_type(),
        }
    }
}

/// One input record. Keys other than `json` pass through to the output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputItem {
    /// Record payload. Replaced by the built mapping on success.
    #[serde(default)]
    pub json: Map<String, Value>,
    /// Everything else the host attached to the record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One output record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutputItem {
    /// The input record with its payload replaced.
    Success(InputItem),
    /// Error report for a failed record.
    Failure {
        /// The failure message.
        error: String,
        /// Zero-based index of the failed record.
        item: usize,
    },
}

impl OutputItem {
    /// Whether this is an error report.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

/// Fatal failure that ends a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("node \"{node}\" failed on item {item}: {error}")]
pub struct NodeApiError {
    /// Name of the failing node.
    pub node: String,
    /// Zero-based index of the failing record.
    pub item: usize,
    /// The original failure. Part of the message, not chained as a source.
    pub error: BuildError,
}

impl NodeApiError {
    /// The original failure message, without node context.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

/// What the surrounding platform provides to one execution.
pub trait ExecutionHost {
    /// Identity of the node being executed.
    fn node(&self) -> &NodeInfo;

    /// The input records, in order.
    fn input_items(&self) -> &[InputItem];

    /// The top-level field collection for the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MalformedParameter`] if the parameter cannot
    /// be decoded.
    fn fields_collection(&self, index: usize) -> Result<Container, BuildError>;

    /// Whether a failed record becomes an error report instead of ending the batch.
    fn continue_on_fail(&self) -> bool;
}

/// Build one record's payload from its top-level field collection.
///
/// Fields with an empty or missing name are skipped. A repeated name
/// replaces the earlier value.
///
/// # Errors
///
/// Returns the first [`BuildError`] raised by any field.
pub fn build_record(fields: &Container, builder: &ValueBuilder) -> Result<Map<String, Value>, BuildError> {
    let mut out = Map::new();
    for field in flatten(Some(fields), GroupKey::Field) {
        if !field.has_name() {
            tracing::debug!("skipping unnamed top-level field");
            continue;
        }
        let value = builder.build(field, DiscriminatorKey::Type)?;
        out.insert(field.display_name().to_string(), value);
    }
    Ok(out)
}

/// Run every input record of `host` through `builder`.
///
/// # Errors
///
/// Returns [`NodeApiError`] for the first failed record when the host does
/// not continue past failures.
pub fn execute<H>(host: &H, builder: &ValueBuilder) -> Result<Vec<OutputItem>, NodeApiError>
where
    H: ExecutionHost + ?Sized,
{
    let items = host.input_items();
    let mut out = Vec::with_capacity(items.len());
    let mut failures = 0usize;

    for (index, item) in items.iter().enumerate() {
        let _span = tracing::debug_span!("record", index).entered();

        let result = host
            .fields_collection(index)
            .and_then(|fields| build_record(&fields, builder));

        match result {
            Ok(json) => {
                tracing::debug!(keys = json.len(), "record built");
                out.push(OutputItem::Success(InputItem {
                    json,
                    extra: item.extra.clone(),
                }));
            }
            Err(err) if host.continue_on_fail() => {
                tracing::warn!(error = %err, "record failed; continuing");
                failures += 1;
                out.push(OutputItem::Failure {
                    error: err.to_string(),
                    item: index,
                });
            }
            Err(err) => {
                tracing::error!(error = %err, node = %host.node().name, "record failed; aborting batch");
                return Err(NodeApiError {
                    node: host.node().name.clone(),
                    item: index,
                    error: err,
                });
            }
        }
    }

    tracing::info!(records = items.len(), failures, "batch complete");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedHost {
        node: NodeInfo,
        items: Vec<InputItem>,
        params: Vec<Value>,
        continue_on_fail: bool,
    }

    impl FixedHost {
        fn new(params: Vec<Value>, continue_on_fail: bool) -> Self {
            let items = params
                .iter()
                .enumerate()
                .map(|(i, _)| InputItem {
                    json: Map::from_iter([("source".to_string(), json!(i))]),
                    extra: Map::from_iter([("pairedItem".to_string(), json!({"item": i}))]),
                })
                .collect();
            Self {
                node: NodeInfo::default(),
                items,
                params,
                continue_on_fail,
            }
        }
    }

    impl ExecutionHost for FixedHost {
        fn node(&self) -> &NodeInfo {
            &self.node
        }

        fn input_items(&self) -> &[InputItem] {
            &self.items
        }

        fn fields_collection(&self, index: usize) -> Result<Container, BuildError> {
            Ok(Container::from_value(self.params[index].clone())?)
        }

        fn continue_on_fail(&self) -> bool {
            self.continue_on_fail
        }
    }

    fn container(value: Value) -> Container {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn unnamed_top_level_fields_are_skipped() {
        let fields = container(json!({"field": [
            {"name": "", "value": "dropped"},
            {"value": "also dropped"},
            {"name": "x", "value": "kept"}
        ]}));
        let out = build_record(&fields, &ValueBuilder::default()).unwrap();
        assert_eq!(Value::Object(out), json!({"x": "kept"}));
    }

    #[test]
    fn falsy_top_level_names_are_skipped() {
        let fields = container(json!({"field": [
            {"name": false, "value": "f"},
            {"name": 0, "value": "z"},
            {"name": "x", "value": "kept"}
        ]}));
        let out = build_record(&fields, &ValueBuilder::default()).unwrap();
        assert_eq!(Value::Object(out), json!({"x": "kept"}));
    }

    #[test]
    fn repeated_top_level_names_keep_the_last_value() {
        let fields = container(json!({"field": [
            {"name": "a", "value": "1"},
            {"name": "a", "value": "2"}
        ]}));
        let out = build_record(&fields, &ValueBuilder::default()).unwrap();
        assert_eq!(Value::Object(out), json!({"a": "2"}));
    }

    #[test]
    fn empty_collection_builds_empty_payload() {
        let out = build_record(&Container::empty(), &ValueBuilder::default()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn success_replaces_json_and_keeps_other_keys() {
        let host = FixedHost::new(vec![json!({"field": [{"name": "a", "value": "x"}]})], false);
        let out = execute(&host, &ValueBuilder::default()).unwrap();
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!([{"json": {"a": "x"}, "pairedItem": {"item": 0}}])
        );
    }

    #[test]
    fn continue_on_fail_reports_and_proceeds() {
        let host = FixedHost::new(
            vec![
                json!({"field": [{"name": "n", "type": "number", "value": "abc"}]}),
                json!({"field": [{"name": "n", "type": "number", "value": "5"}]}),
            ],
            true,
        );
        let out = execute(&host, &ValueBuilder::default()).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out[0].is_failure());
        assert_eq!(
            serde_json::to_value(&out[0]).unwrap(),
            json!({"error": "field \"n\" value is not a number", "item": 0})
        );
        assert_eq!(
            serde_json::to_value(&out[1]).unwrap()["json"],
            json!({"n": 5})
        );
    }

    #[test]
    fn failure_without_continue_aborts_with_node_error() {
        let host = FixedHost::new(
            vec![
                json!({"field": [{"name": "ok", "value": "fine"}]}),
                json!({"field": [{"name": "n", "type": "number"}]}),
                json!({"field": [{"name": "never", "value": "reached"}]}),
            ],
            false,
        );
        let err = execute(&host, &ValueBuilder::default()).unwrap_err();
        assert_eq!(err.node, "Rich Fields");
        assert_eq!(err.item, 1);
        assert_eq!(err.message(), "field \"n\" value is not a number");
        assert_eq!(
            err.to_string(),
            "node \"Rich Fields\" failed on item 1: field \"n\" value is not a number"
        );
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn malformed_parameter_is_a_record_failure() {
        let host = FixedHost::new(vec![json!({"field": [null]})], true);
        let out = execute(&host, &ValueBuilder::default()).unwrap();
        match &out[0] {
            OutputItem::Failure { error, item } => {
                assert!(error.starts_with("malformed fields parameter"));
                assert_eq!(*item, 0);
            }
            other => panic!("Expected Failure, got: {other:?}"),
        }
    }

    #[test]
    fn input_item_round_trips_extra_keys() {
        let item: InputItem =
            serde_json::from_value(json!({"json": {"a": 1}, "binary": {"file": "x"}})).unwrap();
        assert_eq!(item.json["a"], json!(1));
        assert_eq!(item.extra["binary"], json!({"file": "x"}));
        assert!(!item.extra.contains_key("json"));
    }
}
