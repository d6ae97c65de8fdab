//! # rf-schema — Field Descriptor Generation
//!
//! Produces the declarative tree that tells a form renderer what a field
//! definition may contain, and derives a JSON Schema from the same tree.
//!
//! ## Descriptor Generation (`generator`)
//!
//! [`generate`] returns the descriptors for one field definition at a given
//! depth. Object and array branches recurse one level deeper until
//! [`rf_core::MAX_DEPTH`], where they are omitted. [`node_description`]
//! wraps the root level into the full node description.
//!
//! ## JSON Schema (`json_schema`)
//!
//! [`fields_collection_schema`] renders the descriptor tree as a Draft
//! 2020-12 schema with one `$defs` entry per level, and
//! [`DefinitionValidator`] checks host-supplied parameters against it.
//!
//! ## Crate Policy
//!
//! - Depends only on `rf-core` internally.
//! - Generation is total and deterministic.

pub mod descriptor;
pub mod generator;
pub mod json_schema;

pub use descriptor::{
    CollectionGroup, Control, DisplayOptions, FieldDescriptor, Level, NodeDefaults,
    NodeDescription, OptionValue, TypeOptions,
};
pub use generator::{generate, node_description, ARRAY_ITEMS, FIELDS_COLLECTION, OBJECT_FIELDS};
pub use json_schema::{
    fields_collection_schema, DefinitionValidator, SchemaValidationError, ValidationViolations,
    Violation,
};
