//! `richfields build`: run a batch document through the builder.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rf_build::{execute, Batch, OutputItem, ValueBuilder};

use crate::config::RunConfig;

/// Build subcommand arguments.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the batch document (YAML or JSON).
    pub batch: PathBuf,

    /// Report failed records instead of aborting the batch.
    #[arg(long)]
    pub continue_on_fail: bool,

    /// Reject unknown kinds and nesting past the maximum depth.
    #[arg(long)]
    pub strict: bool,

    /// Write output items here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Run the batch at `path` and return its output items.
pub fn build_batch(path: &Path, config: &RunConfig) -> Result<Vec<OutputItem>> {
    let mut batch: Batch = crate::read_document(path)?;
    batch.continue_on_fail |= config.continue_on_fail;

    tracing::info!(
        batch = %path.display(),
        records = batch.items.len(),
        continue_on_fail = batch.continue_on_fail,
        "running batch"
    );

    let builder = ValueBuilder::new(config.policy());
    Ok(execute(&batch, &builder)?)
}

/// Execute the build subcommand.
pub fn run_build(args: &BuildArgs, config: &RunConfig) -> Result<u8> {
    let config = config.with_flags(args.continue_on_fail, args.strict);
    let items = build_batch(&args.batch, &config)?;
    let text = crate::to_json(&items, config.pretty)?;

    match &args.out {
        Some(out) => {
            std::fs::write(out, format!("{text}\n"))
                .with_context(|| format!("writing {}", out.display()))?;
            tracing::info!(out = %out.display(), items = items.len(), "wrote output");
        }
        None => println!("{text}"),
    }
    Ok(0)
}
