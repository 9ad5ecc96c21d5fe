//! design-index: build a sorted JSON index of a team's Figma files.
//!
//! # Usage
//!
//! ```text
//! design-index sync [--output <path>] [--team <id>] [--project-ids <ids>] [--allow <names>] [--jobs <n>] [--dry-run]
//! design-index projects [--team <id>] [--project-ids <ids>] [--allow <names>] [--json]
//! ```
//!
//! The token is read from `FIGMA_TOKEN`; every other setting may come from the
//! environment or from the matching flag, the flag winning.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{projects::ProjectsArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "design-index",
    version,
    about = "Index a team's Figma files into a sorted JSON document",
    long_about = None,
)]
struct Cli {
    /// Log progress to stderr (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch every file of the selected projects and write the index.
    Sync(SyncArgs),

    /// Show which projects a sync would scan.
    Projects(ProjectsArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Projects(args) => args.run(),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
