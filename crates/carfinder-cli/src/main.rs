//! Carfinder CLI
//!
//! Conversational car search over a local catalog.

use anyhow::Result;
use carfinder_core::{Catalog, Config};
use clap::Parser;

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    // Load config, then the catalog (CARFINDER_CATALOG overrides the
    // configured path)
    let config = Config::load()?;
    let catalog_path = std::env::var("CARFINDER_CATALOG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| config.catalog.path.clone());
    let catalog = Catalog::load(&catalog_path)?;

    match cli.command {
        Commands::Chat(args) => commands::chat::run(args, &catalog, &config, cli.format).await,
        Commands::Search(args) => commands::search::run(args, &catalog, cli.format),
        Commands::Recommend(args) => commands::recommend::run(args, &catalog, cli.format),
        Commands::Ls => commands::ls::run(&catalog, cli.format),
        Commands::Status => commands::status::run(&catalog, &config, cli.format),
        Commands::Serve => commands::serve::run(&catalog, &config).await,
    }
}
