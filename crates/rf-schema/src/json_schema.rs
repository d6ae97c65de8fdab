//! # JSON Schema Export and Validation
//!
//! Renders the generated descriptor tree as a JSON Schema (Draft 2020-12)
//! and validates host-supplied `fieldsCollection` parameters against it.
//!
//! ## Layout
//!
//! Every (depth, discriminator key) level becomes one `$defs` entry named
//! by [`Level::id`], so the schema grows linearly with [`MAX_DEPTH`] even
//! though the descriptor tree branches twice per level. Containers accept
//! both encodings: a sequence of group wrappers or a direct mapping.
//!
//! At levels where the generator omits the object and array branches, the
//! schema forbids `objectFields` and `arrayItems` outright, so definitions
//! nested past the bound are rejected.

use std::collections::HashSet;
use std::fmt;

use jsonschema::Validator;
use rf_core::MAX_DEPTH;
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::descriptor::{CollectionGroup, Control, FieldDescriptor, Level};
use crate::generator::{generate, ARRAY_ITEMS, FIELDS_COLLECTION, OBJECT_FIELDS};

const DRAFT_2020_12: &str = "https://json-schema.org/draft/2020-12/schema";

/// Error during schema validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The instance did not conform to the schema.
    #[error("fieldsCollection failed validation:\n{violations}")]
    ValidationFailed {
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The generated schema could not be compiled.
    #[error("validator build error: {reason}")]
    ValidatorBuildError {
        /// Compiler message.
        reason: String,
    },
}

/// One way an instance breaks the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Pointer into the `fieldsCollection` value, empty for the value itself.
    pub instance_path: String,
    /// Keyword location in the schema that rejected it.
    pub schema_path: String,
    /// Validator message.
    pub message: String,
}

impl Violation {
    /// Where the offending value sits, rooted at the parameter name,
    /// e.g. `fieldsCollection/field/0/type`.
    pub fn location(&self) -> String {
        format!("{FIELDS_COLLECTION}{}", self.instance_path)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}: {} [{}]", self.location(), self.message, self.schema_path)
    }
}

/// Every violation found in one instance, in validator order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations(Vec<Violation>);

impl ValidationViolations {
    /// Number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The violations.
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(Violation::to_string).collect();
        f.write_str(&lines.join("\n"))
    }
}

/// JSON Schema for the top-level `fieldsCollection` parameter.
pub fn fields_collection_schema() -> Value {
    let root = Level::root();
    let mut defs = Map::new();
    let mut seen = HashSet::new();
    register_level(root, &generate(root.depth, root.key), &mut defs, &mut seen);

    let mut schema = container_schema("field", &root);
    if let Value::Object(map) = &mut schema {
        map.insert("$schema".to_string(), json!(DRAFT_2020_12));
        map.insert("title".to_string(), json!(FIELDS_COLLECTION));
        map.insert(
            "description".to_string(),
            json!(format!("Rich Fields definitions, nested at most {MAX_DEPTH} levels deep")),
        );
        map.insert("$defs".to_string(), Value::Object(defs));
    }
    schema
}

/// Add the `$defs` entry for `level` and, recursively, every level below it.
fn register_level(
    level: Level,
    descriptors: &[FieldDescriptor],
    defs: &mut Map<String, Value>,
    seen: &mut HashSet<Level>,
) {
    if !seen.insert(level) {
        return;
    }

    let mut properties = Map::new();
    for descriptor in descriptors {
        let property = match &descriptor.control {
            Control::String { .. } => json!({"type": ["string", "number", "boolean", "null"]}),
            Control::Options { options, .. } => {
                let mut allowed: Vec<Value> = options.iter().map(|o| o.value.clone()).collect();
                allowed.push(Value::Null);
                // The builder reads an empty discriminator as the default kind.
                if descriptor.name == level.key.as_str() {
                    allowed.push(json!(""));
                }
                json!({"enum": allowed})
            }
            Control::FixedCollection { options, .. } => {
                // Each branch has a single group.
                match options.first() {
                    Some(group) => {
                        register_group(group, defs, seen);
                        container_schema(&group.name, &group.level)
                    }
                    None => json!(true),
                }
            }
        };
        properties.insert(descriptor.name.clone(), property);
    }

    for slot in [OBJECT_FIELDS, ARRAY_ITEMS] {
        properties.entry(slot).or_insert(Value::Bool(false));
    }

    tracing::trace!(level = %level.id(), "registered schema level");
    defs.insert(
        level.id(),
        json!({
            "type": "object",
            "properties": properties,
        }),
    );
}

fn register_group(group: &CollectionGroup, defs: &mut Map<String, Value>, seen: &mut HashSet<Level>) {
    register_level(group.level, &group.values, defs, seen);
}

/// A container in either encoding, holding definitions of `level` under `sub_key`.
fn container_schema(sub_key: &str, level: &Level) -> Value {
    let reference = format!("#/$defs/{}", level.id());
    let entries = json!({
        "anyOf": [
            {"$ref": reference},
            {"type": "array", "items": {"$ref": reference}}
        ]
    });
    let group = json!({
        "type": "object",
        "properties": {sub_key: entries},
    });
    json!({
        "anyOf": [
            {"type": "array", "items": group},
            group,
            {"type": "null"}
        ]
    })
}

/// Validates `fieldsCollection` parameters against the generated schema.
///
/// The schema is compiled once at construction.
pub struct DefinitionValidator {
    schema: Value,
    validator: Validator,
}

impl fmt::Debug for DefinitionValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let levels = self
            .schema
            .get("$defs")
            .and_then(Value::as_object)
            .map_or(0, Map::len);
        f.debug_struct("DefinitionValidator")
            .field("levels", &levels)
            .finish()
    }
}

impl DefinitionValidator {
    /// Generate and compile the schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidatorBuildError` if the generated
    /// schema does not compile.
    pub fn new() -> Result<Self, SchemaValidationError> {
        let schema = fields_collection_schema();

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator =
            opts.build(&schema)
                .map_err(|e| SchemaValidationError::ValidatorBuildError {
                    reason: e.to_string(),
                })?;

        Ok(Self { schema, validator })
    }

    /// The schema the validator was compiled from.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Returns true if `instance` conforms.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// Validate a `fieldsCollection` instance.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidationFailed` with structured
    /// violation details if the instance is invalid.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        let errors: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                violations: ValidationViolations(errors),
            })
        }
    }
}
