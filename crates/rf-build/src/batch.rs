//! # Batch Documents
//!
//! A batch is a self-contained execution: node identity, failure mode,
//! the field collection, and the input records. Records may override the
//! shared field collection by index.
//!
//! ```yaml
//! node:
//!   name: Build payload
//! continueOnFail: true
//! fieldsCollection:
//!   field:
//!     - name: id
//!       type: number
//!       value: "7"
//! items:
//!   - json: {}
//! ```

use rf_core::{BuildError, Container};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::orchestrator::{ExecutionHost, InputItem, NodeInfo};

/// Per-record parameter overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemParameters {
    /// Replaces the shared field collection for this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields_collection: Option<Value>,
}

/// A batch document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    /// Node identity used in fatal errors.
    #[serde(default)]
    pub node: NodeInfo,
    /// Report failed records instead of aborting.
    #[serde(default)]
    pub continue_on_fail: bool,
    /// Field collection shared by every record. Decoded per record so a
    /// malformed collection fails records rather than the whole document.
    #[serde(default)]
    pub fields_collection: Value,
    /// Input records. Defaults to a single empty record.
    #[serde(default = "default_items")]
    pub items: Vec<InputItem>,
    /// Overrides indexed like `items`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ItemParameters>,
}

fn default_items() -> Vec<InputItem> {
    vec![InputItem::default()]
}

impl Default for Batch {
    fn default() -> Self {
        Self {
            node: NodeInfo::default(),
            continue_on_fail: false,
            fields_collection: Value::Null,
            items: default_items(),
            parameters: Vec::new(),
        }
    }
}

impl Batch {
    /// The raw field collection that applies to the record at `index`.
    pub fn raw_fields_collection(&self, index: usize) -> &Value {
        self.parameters
            .get(index)
            .and_then(|p| p.fields_collection.as_ref())
            .unwrap_or(&self.fields_collection)
    }
}

impl ExecutionHost for Batch {
    fn node(&self) -> &NodeInfo {
        &self.node
    }

    fn input_items(&self) -> &[InputItem] {
        &self.items
    }

    fn fields_collection(&self, index: usize) -> Result<Container, BuildError> {
        Ok(Container::from_value(self.raw_fields_collection(index).clone())?)
    }

    fn continue_on_fail(&self) -> bool {
        self.continue_on_fail
    }
}
