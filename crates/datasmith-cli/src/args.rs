//! CLI argument definitions using clap

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "datasmith")]
#[command(about = "Typed data tools: load, inspect, clean, filter and export tabular data")]
#[command(
    long_about = r#"datasmith - typed data tools for tabular files

USAGE:
  datasmith                      # Start the interactive prompt loop
  datasmith tools                # List available tools and their parameters

The interactive loop keeps loaded datasets in memory for the lifetime of the
process; nothing is persisted across restarts."#
)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive prompt loop (default)
    Interactive,

    /// List all available tools and their parameter schemas
    Tools,
}
