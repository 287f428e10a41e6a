//! Directory-backed queue of pending image manifests.
//!
//! The pending directory is the hand-off point between the URL collector and
//! the image fetcher. A consumer scans it, walks [`PendingQueue::claims`] to
//! read one entry at a time, and archives each entry out of the directory once
//! its work is done. Entries are not locked: the queue assumes a single
//! consumer.

use std::path::{Path, PathBuf};

use akcija_core::ImageManifest;

use crate::error::ScraperError;
use crate::store::read_image_manifest;

#[derive(Debug)]
pub struct PendingQueue {
    dir: PathBuf,
    entries: Vec<PathBuf>,
}

/// A manifest read from the queue and not yet archived.
#[derive(Debug)]
pub struct ClaimedManifest {
    pub path: PathBuf,
    /// File name without the `.json` extension; names the output folder.
    pub stem: String,
    pub manifest: ImageManifest,
}

impl PendingQueue {
    /// Lists the `*.json` files directly inside `dir`, sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Io`] if `dir` cannot be read.
    pub fn scan(dir: &Path) -> Result<Self, ScraperError> {
        let reader = std::fs::read_dir(dir).map_err(|e| ScraperError::io(dir, e))?;

        let mut entries = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|e| ScraperError::io(dir, e))?;
            let path = entry.path();
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if is_json && path.is_file() {
                entries.push(path);
            }
        }
        entries.sort();

        Ok(Self {
            dir: dir.to_path_buf(),
            entries,
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Claims the entries in scan order. Each entry is read when the iterator
    /// reaches it.
    pub fn claims(
        &self,
    ) -> impl Iterator<Item = (&Path, Result<ClaimedManifest, ScraperError>)> + '_ {
        self.entries
            .iter()
            .map(|path| (path.as_path(), ClaimedManifest::read(path)))
    }
}

impl ClaimedManifest {
    /// Reads and parses one manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Io`] or [`ScraperError::Json`] when the file
    /// is unreadable or not a manifest. The file is left where it is.
    pub fn read(path: &Path) -> Result<Self, ScraperError> {
        let manifest = read_image_manifest(path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            path: path.to_path_buf(),
            stem,
            manifest,
        })
    }

    /// Moves the manifest file into `folder`, returning its new path.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Io`] if the file cannot be moved.
    pub fn archive(self, folder: &Path) -> Result<PathBuf, ScraperError> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| ScraperError::io(&self.path, std::io::ErrorKind::InvalidInput.into()))?;
        let dest = folder.join(file_name);
        move_file(&self.path, &dest)?;
        Ok(dest)
    }
}

/// Renames `from` to `to`, falling back to copy-then-remove when a rename is
/// not possible (e.g. across filesystems).
fn move_file(from: &Path, to: &Path) -> Result<(), ScraperError> {
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    std::fs::copy(from, to).map_err(|e| ScraperError::io(to, e))?;
    std::fs::remove_file(from).map_err(|e| ScraperError::io(from, e))
}
