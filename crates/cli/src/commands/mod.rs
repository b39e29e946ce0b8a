//! CLI command definitions and execution
//!
//! Running `lprobe` without a command probes the configured tables.

use clap::{Parser, Subcommand};

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

mod completions;
pub mod probe;
mod resolve;

/// lprobe - Lance table probe
///
/// Opens a Lance table on TOS/S3 object storage with anonymous access and
/// falls back to a metadata table when the primary cannot be opened.
#[derive(Parser, Debug)]
#[command(name = "lprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(flatten)]
    pub probe: probe::ProbeArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the primary table, or the fallback table if that fails (default)
    Probe(probe::ProbeArgs),

    /// Show how a table URI splits into bucket, root and table
    Resolve(resolve::ResolveArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };

    match cli.command {
        None => probe::execute(cli.probe, output_config).await,
        Some(Commands::Probe(args)) => probe::execute(args, output_config).await,
        Some(Commands::Resolve(args)) => resolve::execute(args, output_config),
        Some(Commands::Completions(args)) => completions::execute(args),
    }
}
