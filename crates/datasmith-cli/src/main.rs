//! datasmith CLI application
//!
//! A thin, typed caller over the datasmith tool surface. The default mode is
//! an interactive prompt loop that keeps loaded datasets in process memory;
//! `datasmith tools` lists the operation schemas the surface exposes.

mod args;
mod console;

use args::{Cli, Commands};
use clap::Parser;
use console::Console;
use datasmith_core::store::DatasetStore;
use datasmith_core::tools::ToolExecutor;
use datasmith_tools::default_tools;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; --verbose raises the default level to debug
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let store = Arc::new(DatasetStore::new());
    let mut executor = ToolExecutor::new();
    executor.register_tools(default_tools(store.clone()));

    match cli.command {
        Some(Commands::Tools) => {
            for schema in executor.tool_schemas() {
                println!("{}: {}", schema.name, schema.description);
            }
            Ok(())
        }
        Some(Commands::Interactive) | None => {
            let mut console = Console::new(executor, store);
            console.run().await?;
            Ok(())
        }
    }
}
