//! # richfields CLI entry point
//!
//! Parses command-line arguments, loads the run configuration, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rf_cli::build::{run_build, BuildArgs};
use rf_cli::config::RunConfig;
use rf_cli::schema::{run_schema, SchemaArgs};
use rf_cli::validate::{run_validate, ValidateArgs};

/// Rich Fields: build nested JSON values from declarative field definitions.
#[derive(Parser, Debug)]
#[command(name = "richfields", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a run configuration file (YAML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the node description, one level's descriptors, or the JSON Schema.
    Schema(SchemaArgs),

    /// Run a batch document and write the output items.
    Build(BuildArgs),

    /// Validate a batch's field collections against the JSON Schema.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Output goes to stdout; keep diagnostics off it.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("richfields CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = RunConfig::load(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Schema(args) => run_schema(args),
        Commands::Build(args) => run_build(args, &config),
        Commands::Validate(args) => run_validate(args),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
