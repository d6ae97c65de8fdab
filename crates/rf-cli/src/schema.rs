//! # Schema Output
//!
//! `richfields schema` prints what a host needs to render or check the
//! node's parameters.
//!
//! ```bash
//! richfields schema                          # node description
//! richfields schema --format fields --depth 3 --item
//! richfields schema --format json-schema
//! ```

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use rf_core::{Depth, DiscriminatorKey, MAX_DEPTH};
use serde_json::Value;

/// Schema subcommand arguments.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// What to print.
    #[arg(long, value_enum, default_value_t = SchemaFormat::Node)]
    pub format: SchemaFormat,

    /// Nesting level for `--format fields`, starting at 1.
    #[arg(long, default_value_t = 1)]
    pub depth: u32,

    /// Describe array entries (`itemType`) instead of named fields.
    #[arg(long)]
    pub item: bool,
}

/// Output selection for `richfields schema`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaFormat {
    /// The full node description.
    Node,
    /// Descriptors for one nesting level.
    Fields,
    /// JSON Schema for the `fieldsCollection` parameter.
    JsonSchema,
}

/// Produce the document selected by `args`.
pub fn render(args: &SchemaArgs) -> Result<Value> {
    let value = match args.format {
        SchemaFormat::Node => serde_json::to_value(rf_schema::node_description())?,
        SchemaFormat::Fields => {
            let depth = match Depth::new(args.depth) {
                Some(depth) if !depth.exceeds_max() => depth,
                _ => bail!("--depth must be between 1 and {MAX_DEPTH}, got {}", args.depth),
            };
            let key = if args.item {
                DiscriminatorKey::ItemType
            } else {
                DiscriminatorKey::Type
            };
            serde_json::to_value(rf_schema::generate(depth, key))?
        }
        SchemaFormat::JsonSchema => rf_schema::fields_collection_schema(),
    };
    Ok(value)
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs) -> Result<u8> {
    let value = render(args)?;
    println!("{}", crate::to_json(&value, true)?);
    Ok(0)
}
