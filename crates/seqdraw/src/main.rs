//! seqdraw CLI - Sequence-diagram validation and rendering.
//!
//! Provides commands for:
//! - `check`: Validate a diagram and report errors with line numbers
//! - `analyze`: Report complexity metrics
//! - `render`: Render a diagram to SVG through Kroki

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AnalyzeArgs, CheckArgs, RenderArgs};
use output::Output;

/// seqdraw - Sequence-diagram validation and rendering.
#[derive(Parser)]
#[command(name = "seqdraw", version, about)]
struct Cli {
    /// Enable verbose output (cache and render logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate diagram syntax.
    Check(CheckArgs),
    /// Report diagram complexity.
    Analyze(AnalyzeArgs),
    /// Render a diagram to SVG.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Analyze(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
