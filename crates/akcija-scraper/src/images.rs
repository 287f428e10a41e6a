//! Brochure image URL collection.
//!
//! Every `<img>` on a page is resolved to its effective source (lazy-load
//! attributes first), filtered down to content images, and made absolute
//! against the page URL. Duplicates are kept in document order.

use std::path::{Path, PathBuf};

use akcija_core::naming::manifest_file_name;
use akcija_core::ImageManifest;
use scraper::Html;
use url::Url;

use crate::client::PageClient;
use crate::error::ScraperError;
use crate::node::{NodeQuery, Query};
use crate::store::write_json;

const IMAGE: Query = Query::tag("img");

/// Source attributes in priority order; the first non-empty one wins.
const SOURCE_ATTRIBUTES: [&str; 5] = [
    "data-src",
    "data-lazy-src",
    "data-original",
    "data-srcset",
    "src",
];

const SRCSET_ATTRIBUTE: &str = "data-srcset";

const PLACEHOLDER_MARKERS: [&str; 11] = [
    "placeholder",
    "spacer",
    "blank",
    "pixel",
    "tracking",
    "1x1",
    "transparent",
    "loading",
    "default",
    "no-image",
    "empty",
];

const CONTENT_PATH_MARKER: &str = "admin/contentfiles/";

/// Effective image source of an `<img>`-like node.
///
/// For a source-set attribute only the first candidate URL is returned (the
/// text before the first comma, then before the first space), which may be
/// empty.
pub fn resolve_image_source<N: NodeQuery>(img: &N) -> Option<String> {
    SOURCE_ATTRIBUTES.iter().find_map(|&name| {
        let value = img.attr(name).filter(|v| !v.is_empty())?;
        if name == SRCSET_ATTRIBUTE {
            let first = value.split(',').next().unwrap_or_default();
            Some(first.split(' ').next().unwrap_or_default().to_owned())
        } else {
            Some(value.to_owned())
        }
    })
}

/// `true` when `src` points into the brochure content path and carries none
/// of the placeholder markers. Both checks ignore case.
#[must_use]
pub fn is_content_image(src: &str) -> bool {
    let lower = src.to_lowercase();
    if PLACEHOLDER_MARKERS.iter().any(|m| lower.contains(m)) {
        return false;
    }
    lower.contains(CONTENT_PATH_MARKER)
}

/// Absolute URLs of every content image under `root`, in document order.
pub fn extract_image_urls<N: NodeQuery>(root: &N, base: &Url) -> Vec<String> {
    root.find_all(&IMAGE)
        .iter()
        .filter_map(resolve_image_source)
        .filter(|src| !src.is_empty() && is_content_image(src))
        .filter_map(|src| match base.join(&src) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                tracing::warn!(src = %src, error = %e, "skipping unresolvable image source");
                None
            }
        })
        .collect()
}

/// Parses `html` fetched from `page_url` and returns its content image URLs.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `page_url` is not an absolute URL.
pub fn collect_image_urls(page_url: &str, html: &str) -> Result<Vec<String>, ScraperError> {
    let base = Url::parse(page_url).map_err(|e| ScraperError::InvalidUrl {
        url: page_url.to_owned(),
        reason: e.to_string(),
    })?;
    let document = Html::parse_document(html);
    Ok(extract_image_urls(&document.root_element(), &base))
}

/// Fetches `url` and returns its content image URLs.
///
/// Any failure is logged and yields an empty list.
pub async fn scrape_image_urls(client: &PageClient, url: &str) -> Vec<String> {
    let body = match client.fetch_html(url).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "failed to fetch brochure page");
            return Vec::new();
        }
    };

    match collect_image_urls(url, &body) {
        Ok(urls) => {
            tracing::info!(url = %url, images = urls.len(), "collected image URLs");
            urls
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "failed to resolve image URLs");
            Vec::new()
        }
    }
}

/// Writes `urls` as an [`ImageManifest`] to `{dir}/{prefix}_{timestamp}.json`,
/// creating `dir` if needed.
///
/// # Errors
///
/// Returns [`ScraperError::Io`] or [`ScraperError::Json`] if the manifest
/// cannot be written.
pub fn save_image_manifest(
    dir: &Path,
    prefix: &str,
    urls: Vec<String>,
    timestamp: &str,
) -> Result<PathBuf, ScraperError> {
    let manifest = ImageManifest::new(timestamp, urls);
    let path = dir.join(manifest_file_name(prefix, timestamp));
    write_json(&path, &manifest, "image manifest")?;
    tracing::info!(
        path = %path.display(),
        images = manifest.total_images,
        "saved image manifest"
    );
    Ok(path)
}

#[cfg(test)]
#[path = "images_test.rs"]
mod tests;
