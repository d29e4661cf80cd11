//! CLI entry point for the stock sync pipeline.
//!
//! `run` executes both phases like the original end-to-end job; `scrape` and
//! `update` exist so a finished checkpoint can be re-pushed without touching
//! the storefront again.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use safilo_stock_sync::application::pipeline;
use safilo_stock_sync::infrastructure::config::{AppConfig, Credentials, WooCredentials};
use safilo_stock_sync::infrastructure::logging;

#[derive(Debug, Parser)]
#[command(name = "safilo-stock-sync", version, about = "Safilo storefront stock scraper with WooCommerce push")]
struct Cli {
    /// Path to a JSON config file (defaults to stock-sync.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the catalog CSV path from the config
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Override the checkpoint file path from the config
    #[arg(long, global = true)]
    checkpoint: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape storefront availability, then push updates to WooCommerce
    Run,
    /// Scrape storefront availability into the checkpoint only
    Scrape,
    /// Push pending checkpoint records to WooCommerce only
    Update {
        /// Report what would be pushed without calling WooCommerce
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).await?;
    if let Some(input) = cli.input {
        config.files.input_csv = input;
    }
    if let Some(checkpoint) = cli.checkpoint {
        config.files.checkpoint = checkpoint;
    }

    logging::init_logging(&config.logging)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            // Credentials for both phases are checked up front so a missing
            // WooCommerce key does not surface after an hour of scraping.
            let storefront_credentials = Credentials::from_env()?;
            let woo_credentials = WooCredentials::from_env()?;
            pipeline::scrape_phase(&config, &storefront_credentials).await?;
            pipeline::update_phase(&config, &woo_credentials, false).await?;
        }
        Commands::Scrape => {
            let storefront_credentials = Credentials::from_env()?;
            pipeline::scrape_phase(&config, &storefront_credentials).await?;
        }
        Commands::Update { dry_run } => {
            let woo_credentials = WooCredentials::from_env()?;
            pipeline::update_phase(&config, &woo_credentials, dry_run).await?;
        }
    }

    Ok(())
}
