//! Docgate CLI - Documentation build gate.
//!
//! Provides commands for:
//! - `check`: Validate navigation and declared links against content
//! - `inventory`: List discovered document ids

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, InventoryArgs};
use output::Output;

/// Docgate - Documentation build gate.
#[derive(Parser)]
#[command(name = "docgate", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check navigation and declared links against the content tree.
    Check(CheckArgs),
    /// List discovered document ids.
    Inventory(InventoryArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Check(args) => args.verbose,
        Commands::Inventory(args) => args.verbose,
    };

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Inventory(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
