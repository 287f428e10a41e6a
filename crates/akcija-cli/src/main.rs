mod images;
mod ocr;
mod offers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::images::ImagesCommands;

#[derive(Debug, Parser)]
#[command(name = "akcija")]
#[command(about = "Scrape promotional offers and brochure images, then OCR them")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract offer sections from the promotions page into a JSON file
    Offers {
        /// Page to scrape instead of the configured offers URL
        #[arg(long)]
        url: Option<String>,
    },
    /// Collect brochure image URLs or download pending batches
    Images {
        #[command(subcommand)]
        command: ImagesCommands,
    },
    /// Run OCR over every image in a folder
    Ocr {
        /// Folder holding the images (not searched recursively)
        folder: PathBuf,

        /// Blur and threshold images before recognition
        #[arg(long)]
        binarize: bool,
    },
}

fn build_client(config: &akcija_core::AppConfig) -> anyhow::Result<akcija_scraper::PageClient> {
    akcija_scraper::PageClient::new(config.request_timeout_secs, &config.user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = akcija_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Offers { url }) => {
            let client = build_client(&config)?;
            offers::run_offers(&client, &config, url.as_deref()).await?;
        }
        Some(Commands::Images { command }) => match command {
            ImagesCommands::Collect { url, prefix } => {
                let client = build_client(&config)?;
                images::run_collect(&client, &config, url.as_deref(), prefix.as_deref()).await?;
            }
            ImagesCommands::Fetch => {
                let client = build_client(&config)?;
                images::run_fetch(&client, &config).await?;
            }
        },
        Some(Commands::Ocr { folder, binarize }) => {
            ocr::run_ocr(config, folder, binarize).await?;
        }
        None => println!("nothing to do; run `akcija --help` for the available commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
