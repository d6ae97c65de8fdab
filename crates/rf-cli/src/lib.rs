//! # rf-cli — Command-Line Driver for Rich Fields
//!
//! Provides the `richfields` binary.
//!
//! ## Subcommands
//!
//! - `richfields schema`: Print the node description, one level's
//!   parameter descriptors, or the JSON Schema for `fieldsCollection`.
//! - `richfields build`: Run a batch document through the builder.
//! - `richfields validate`: Check a batch's field collections against
//!   the generated schema.
//!
//! ```bash
//! richfields schema --format json-schema
//! richfields build batch.yaml --continue-on-fail --out out.json
//! richfields validate batch.json
//! ```
//!
//! Documents ending in `.yaml` or `.yml` are read as YAML, everything else
//! as JSON.

pub mod build;
pub mod config;
pub mod schema;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Whether `path` names a YAML document.
pub fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

/// Read and deserialize a YAML or JSON document.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    if is_yaml(path) {
        serde_yaml::from_str(&content).with_context(|| format!("parsing YAML: {}", path.display()))
    } else {
        serde_json::from_str(&content).with_context(|| format!("parsing JSON: {}", path.display()))
    }
}

/// Serialize `value` as JSON, pretty-printed or compact.
pub fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.context("serializing output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn yaml_detection_by_extension() {
        assert!(is_yaml(Path::new("batch.yaml")));
        assert!(is_yaml(Path::new("dir/batch.yml")));
        assert!(!is_yaml(Path::new("batch.json")));
        assert!(!is_yaml(Path::new("batch")));
    }

    #[test]
    fn reads_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("doc.yaml");
        let json_path = dir.path().join("doc.json");
        std::fs::write(&yaml, "a: 1\nb: [x]\n").unwrap();
        std::fs::write(&json_path, r#"{"a": 1, "b": ["x"]}"#).unwrap();

        let from_yaml: Value = read_document(&yaml).unwrap();
        let from_json: Value = read_document(&json_path).unwrap();
        assert_eq!(from_yaml, json!({"a": 1, "b": ["x"]}));
        assert_eq!(from_yaml, from_json);
    }

    #[test]
    fn json_extension_is_not_parsed_as_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "a: 1\n").unwrap();
        let err = read_document::<Value>(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing JSON"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_document::<Value>(Path::new("/nonexistent/batch.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/batch.json"));
    }

    #[test]
    fn compact_and_pretty_output() {
        let v = json!({"a": [1]});
        assert_eq!(to_json(&v, false).unwrap(), r#"{"a":[1]}"#);
        assert!(to_json(&v, true).unwrap().contains('\n'));
    }
}
