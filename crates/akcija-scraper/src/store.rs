//! JSON files on disk: manifests and extraction results.

use std::path::Path;

use akcija_core::{to_json_pretty, ImageManifest};
use serde::Serialize;

use crate::error::ScraperError;

/// Writes `value` as indented UTF-8 JSON, creating the parent directory if
/// it does not exist.
///
/// # Errors
///
/// Returns [`ScraperError::Json`] if serialization fails or
/// [`ScraperError::Io`] if the directory or file cannot be written.
pub fn write_json<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
    context: &str,
) -> Result<(), ScraperError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ScraperError::io(parent, e))?;
    }
    let bytes = to_json_pretty(value).map_err(|e| ScraperError::Json {
        context: context.to_owned(),
        source: e,
    })?;
    std::fs::write(path, bytes).map_err(|e| ScraperError::io(path, e))
}

/// Reads an image manifest written by the collector.
///
/// # Errors
///
/// Returns [`ScraperError::Io`] if the file cannot be read or
/// [`ScraperError::Json`] if it is not a valid manifest.
pub fn read_image_manifest(path: &Path) -> Result<ImageManifest, ScraperError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ScraperError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| ScraperError::Json {
        context: format!("image manifest {}", path.display()),
        source: e,
    })
}
