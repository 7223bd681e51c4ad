//! jetcat Command-Line Shell
//!
//! Runs SHOW statements against a catalog snapshot, one-shot, from a script,
//! or interactively.

mod commands;
mod completer;
mod executor;
mod formatter;
mod repl;

use clap::{Parser, ValueEnum};
use formatter::OutputFormat;
use jetcat::{CatalogEngine, Collation, EngineConfig, NullOrder, SnapshotDriver};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// jetcat Command-Line Shell
#[derive(Parser, Debug)]
#[command(name = "jetcat")]
#[command(version, about = "Query database catalog metadata with SHOW statements")]
pub struct Args {
    /// JSON catalog snapshot to query
    #[arg(short = 's', long)]
    pub snapshot: PathBuf,

    /// Execute a single statement and exit
    #[arg(short = 'c', long)]
    pub command: Option<String>,

    /// Execute statements from file
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// String comparison rules for WHERE and ORDER BY
    #[arg(long, default_value = "nocase", value_enum)]
    pub collation: CollationArg,

    /// Sort nulls after non-null values
    #[arg(long)]
    pub nulls_last: bool,
}

/// Collation choices on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollationArg {
    /// Case-sensitive
    Binary,
    /// Case-insensitive
    Nocase,
}

impl From<CollationArg> for Collation {
    fn from(arg: CollationArg) -> Self {
        match arg {
            CollationArg::Binary => Collation::Binary,
            CollationArg::Nocase => Collation::NoCase,
        }
    }
}

fn main() {
    // Logs go to stderr so json/csv output stays machine-readable.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("jetcat_cli=info,jetcat_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let null_order = if args.nulls_last {
        NullOrder::Last
    } else {
        NullOrder::First
    };
    let config = EngineConfig::new(args.collation.into()).with_null_order(null_order);
    let engine = CatalogEngine::open_snapshot(&args.snapshot, config)?;

    if let Some(command) = &args.command {
        run_command_mode(engine, command, args.format)
    } else if let Some(file) = &args.file {
        run_script_mode(engine, file, args.format)
    } else {
        repl::run(engine, &args.snapshot, args.format)
    }
}

/// Execute a single statement and exit.
fn run_command_mode(
    mut engine: CatalogEngine<SnapshotDriver>,
    command: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let formatter = formatter::create_formatter(format);

    match executor::execute(&mut engine, command, &*formatter) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Execute statements from a file.
fn run_script_mode(
    mut engine: CatalogEngine<SnapshotDriver>,
    file: &Path,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(file)?;
    let formatter = formatter::create_formatter(format);
    let mut failures = 0;

    for statement in executor::split_statements(&content) {
        match executor::execute(&mut engine, &statement, &*formatter) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                // Keep going; report every bad statement.
                eprintln!("{}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        tracing::warn!(failures, file = %file.display(), "script finished with errors");
        std::process::exit(1);
    }
    Ok(())
}
