//! `akcija offers`: one page fetch, one JSON file.

use akcija_core::AppConfig;
use akcija_scraper::{save_offers, scrape_offers, PageClient};

/// Scrapes the offers page and saves the sections.
///
/// A fetch failure or a page without sections writes nothing and is not an
/// error.
///
/// # Errors
///
/// Returns an error only if the output file cannot be written.
pub(crate) async fn run_offers(
    client: &PageClient,
    config: &AppConfig,
    url_override: Option<&str>,
) -> anyhow::Result<()> {
    let url = url_override.unwrap_or(&config.offers_url);
    tracing::info!(url = %url, "scraping offers");

    let sections = scrape_offers(client, url).await;
    if sections.is_empty() {
        tracing::warn!(url = %url, "no data to save");
        return Ok(());
    }

    let timestamp = akcija_core::batch_timestamp();
    let path = save_offers(&config.offers_dir, &sections, &timestamp)?;
    tracing::info!(path = %path.display(), sections = sections.len(), "saved offers");
    Ok(())
}
