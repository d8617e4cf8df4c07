//! # fixcheck entry point
//!
//! Parses arguments, sets up logging, and runs the validator over one
//! directory. Exit status: 0 when every fixture decodes, 1 when any file
//! fails, 2 when the directory cannot be listed or the arguments are bad.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fixcheck_cli::{run, FailureMode, FsReader, RunConfig, TracingReporter, ValidationError};
use fixcheck_schema::{DecodeOptions, Schema};

/// Checks that every JSON fixture in a directory conforms to the Firestore
/// conformance test schema.
#[derive(Parser, Debug)]
#[command(name = "fixcheck", version, about, long_about = None)]
struct Cli {
    /// Directory holding the fixture files.
    directory: PathBuf,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Keep validating after a failure and report every failing file.
    #[arg(long)]
    keep_going: bool,

    /// Reject JSON keys that match no field of the schema.
    #[arg(long)]
    deny_unknown_fields: bool,
}

impl Cli {
    fn config(&self) -> RunConfig {
        RunConfig {
            failure_mode: if self.keep_going {
                FailureMode::CollectAll
            } else {
                FailureMode::FailFast
            },
            decode: DecodeOptions {
                ignore_unknown_fields: !self.deny_unknown_fields,
                ..DecodeOptions::default()
            },
            ..RunConfig::default()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // No subscriber yet, so setup failures go straight to stderr.
    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("fixcheck: {e:#}");
        return ExitCode::from(2);
    }

    match try_main(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn try_main(cli: &Cli) -> anyhow::Result<ExitCode> {
    let schema = Schema::conformance().context("built-in conformance schema is inconsistent")?;
    tracing::debug!(
        messages = schema.message_count(),
        enums = schema.enum_count(),
        "schema loaded"
    );

    let result = run(
        &cli.directory,
        &schema,
        &cli.config(),
        &mut FsReader,
        &mut TracingReporter,
    );

    Ok(match result {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(ValidationError::DirectoryRead { .. }) => ExitCode::from(2),
        Err(_) => ExitCode::from(1),
    })
}

/// Installs the global subscriber. `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(verbose, rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

fn log_filter(verbose: u8, rust_log: Option<&str>) -> anyhow::Result<EnvFilter> {
    if let Some(directives) = rust_log {
        return EnvFilter::try_new(directives).with_context(|| format!("invalid RUST_LOG filter {directives:?}"));
    }
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    Ok(EnvFilter::new(level))
}
