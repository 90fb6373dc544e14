//! Combo CLI - asset combo rewriter.
//!
//! Provides commands for:
//! - `process`: Merge `data-combo` groups in HTML files or stdin
//! - `inspect`: List the groups that would be merged

mod commands;
mod error;
mod input;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{InspectArgs, ProcessArgs};
use output::Output;

/// Combo - merges script and link tags into combo-server URLs.
#[derive(Parser)]
#[command(name = "combo", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite HTML, merging tags that share a data-combo group.
    Process(ProcessArgs),
    /// Show the groups that would be merged without writing anything.
    Inspect(InspectArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Process(args) => args.verbose,
        Commands::Inspect(args) => args.verbose,
    };

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Process(args) => args.execute(),
        Commands::Inspect(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
