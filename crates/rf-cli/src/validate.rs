//! `richfields validate`: check a batch's field collections against the
//! generated JSON Schema.
//!
//! Exit code 0 when every collection conforms, 2 otherwise.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rf_build::Batch;
use rf_schema::{DefinitionValidator, SchemaValidationError};

/// Validate subcommand arguments.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the batch document (YAML or JSON).
    pub batch: PathBuf,
}

/// Validate every field collection in `batch`, returning one
/// `(label, message)` pair per non-conforming collection.
pub fn check_batch(
    batch: &Batch,
    validator: &DefinitionValidator,
) -> Result<Vec<(String, String)>> {
    let mut collections = vec![("fieldsCollection".to_string(), &batch.fields_collection)];
    for (index, params) in batch.parameters.iter().enumerate() {
        if let Some(raw) = &params.fields_collection {
            collections.push((format!("parameters[{index}].fieldsCollection"), raw));
        }
    }

    let mut failures = Vec::new();
    for (label, raw) in collections {
        match validator.validate(raw) {
            Ok(()) => tracing::debug!(collection = %label, "valid"),
            Err(err @ SchemaValidationError::ValidationFailed { .. }) => {
                failures.push((label, err.to_string()));
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(failures)
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let batch: Batch = crate::read_document(&args.batch)?;
    let validator = DefinitionValidator::new()?;
    let failures = check_batch(&batch, &validator)?;

    if failures.is_empty() {
        println!("OK: {}", args.batch.display());
        return Ok(0);
    }
    for (label, message) in &failures {
        println!("FAIL: {} {label}: {message}", args.batch.display());
    }
    Ok(2)
}
