//! Image download for pending manifests.
//!
//! Each manifest gets its own folder under the images directory, named after
//! the manifest's file stem. Downloads run one URL at a time; a failed URL is
//! logged and counted, never fatal. Once every URL has been attempted the
//! manifest itself is moved into that folder.

use std::path::{Path, PathBuf};

use url::Url;

use crate::client::PageClient;
use crate::error::ScraperError;
use crate::queue::{ClaimedManifest, PendingQueue};

/// Outcome of processing one manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    /// Where the manifest was archived.
    pub manifest: PathBuf,
    pub folder: PathBuf,
    pub total: usize,
    pub downloaded: usize,
}

/// Last path segment of `url`, used as the local file name.
///
/// # Errors
///
/// - [`ScraperError::InvalidUrl`] if `url` does not parse.
/// - [`ScraperError::MissingFileName`] if the path ends in `/` or is empty.
pub fn url_file_name(url: &str) -> Result<String, ScraperError> {
    let parsed = Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })?;
    parsed
        .path_segments()
        .and_then(Iterator::last)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ScraperError::MissingFileName {
            url: url.to_owned(),
        })
}

async fn download_image(
    client: &PageClient,
    url: &str,
    folder: &Path,
) -> Result<PathBuf, ScraperError> {
    let dest = folder.join(url_file_name(url)?);
    client.download_to_file(url, &dest).await?;
    Ok(dest)
}

/// Downloads every image listed in the manifest at `path`, then archives the
/// manifest into the download folder.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or parsed, the download
/// folder cannot be created, or the manifest cannot be moved. Individual
/// download failures are only counted.
pub async fn fetch_manifest(
    client: &PageClient,
    images_dir: &Path,
    path: &Path,
) -> Result<FetchReport, ScraperError> {
    let claimed = ClaimedManifest::read(path)?;
    download_claimed(client, images_dir, claimed).await
}

async fn download_claimed(
    client: &PageClient,
    images_dir: &Path,
    claimed: ClaimedManifest,
) -> Result<FetchReport, ScraperError> {
    let folder = images_dir.join(&claimed.stem);
    std::fs::create_dir_all(&folder).map_err(|e| ScraperError::io(&folder, e))?;

    let total = claimed.manifest.image_urls.len();
    tracing::info!(
        manifest = %claimed.path.display(),
        folder = %folder.display(),
        images = total,
        "processing manifest"
    );

    let mut downloaded = 0usize;
    for (i, url) in claimed.manifest.image_urls.iter().enumerate() {
        match download_image(client, url, &folder).await {
            Ok(dest) => {
                downloaded += 1;
                tracing::debug!(
                    index = i + 1,
                    total,
                    path = %dest.display(),
                    "downloaded image"
                );
            }
            Err(e) => {
                tracing::warn!(
                    index = i + 1,
                    total,
                    url = %url,
                    error = %e,
                    "image download failed"
                );
            }
        }
    }

    let manifest = claimed.archive(&folder)?;
    tracing::info!(
        downloaded,
        total,
        folder = %folder.display(),
        "download complete"
    );

    Ok(FetchReport {
        manifest,
        folder,
        total,
        downloaded,
    })
}

/// Processes every manifest in `pending_dir` in file-name order.
///
/// A manifest that fails is logged and skipped; the rest still run.
///
/// # Errors
///
/// Returns [`ScraperError::Io`] only if `pending_dir` itself cannot be read.
pub async fn fetch_pending(
    client: &PageClient,
    pending_dir: &Path,
    images_dir: &Path,
) -> Result<Vec<FetchReport>, ScraperError> {
    let queue = PendingQueue::scan(pending_dir)?;
    tracing::info!(
        dir = %queue.dir().display(),
        manifests = queue.len(),
        "scanned pending manifests"
    );

    let mut reports = Vec::with_capacity(queue.len());
    for (path, claim) in queue.claims() {
        let outcome = match claim {
            Ok(claimed) => download_claimed(client, images_dir, claimed).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(report) => reports.push(report),
            Err(e) => {
                tracing::warn!(manifest = %path.display(), error = %e, "skipping manifest");
            }
        }
    }
    Ok(reports)
}
