//! `akcija images collect|fetch`.
//!
//! `collect` drops a URL manifest into the pending directory; `fetch` drains
//! that directory. The two only meet through the files on disk.

use akcija_core::AppConfig;
use akcija_scraper::{fetch_pending, save_image_manifest, scrape_image_urls, PageClient};
use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum ImagesCommands {
    /// Collect brochure image URLs into a pending manifest
    Collect {
        /// Page to scan instead of the configured brochure URL
        #[arg(long)]
        url: Option<String>,

        /// Manifest file name prefix
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Download every pending manifest's images and archive the manifests
    Fetch,
}

pub(crate) async fn run_collect(
    client: &PageClient,
    config: &AppConfig,
    url_override: Option<&str>,
    prefix_override: Option<&str>,
) -> anyhow::Result<()> {
    let url = url_override.unwrap_or(&config.brochure_url);
    let prefix = prefix_override.unwrap_or(&config.manifest_prefix);
    tracing::info!(url = %url, "scraping images");

    let urls = scrape_image_urls(client, url).await;
    if urls.is_empty() {
        tracing::warn!(url = %url, "no valid images found or an error occurred");
        return Ok(());
    }

    let timestamp = akcija_core::batch_timestamp();
    save_image_manifest(&config.pending_dir, prefix, urls, &timestamp)?;
    Ok(())
}

pub(crate) async fn run_fetch(client: &PageClient, config: &AppConfig) -> anyhow::Result<()> {
    let pending = &config.pending_dir;
    if !pending.exists() {
        std::fs::create_dir_all(pending)?;
        tracing::info!(
            dir = %pending.display(),
            "created pending directory; place manifest JSON files there"
        );
        return Ok(());
    }

    let reports = fetch_pending(client, pending, &config.images_dir).await?;
    if reports.is_empty() {
        tracing::info!(dir = %pending.display(), "no manifests processed");
        return Ok(());
    }

    for report in &reports {
        tracing::info!(
            folder = %report.folder.display(),
            downloaded = report.downloaded,
            total = report.total,
            "batch finished"
        );
    }
    Ok(())
}
