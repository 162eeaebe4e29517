//! autodoc CLI - Sphinx autodoc for Markdown documents.
//!
//! Provides commands for:
//! - `build`: Fill `::automodule` directives with Sphinx output and write HTML or JSON
//! - `request`: Print the Sphinx request file for a document without running Sphinx

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, RequestArgs};
use output::Output;

/// autodoc - API documentation from Sphinx autodoc, embedded in Markdown.
#[derive(Parser)]
#[command(name = "autodoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build Markdown documents.
    Build(BuildArgs),
    /// Print the request file Sphinx would receive for a document.
    Request(RequestArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Build(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Request(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
