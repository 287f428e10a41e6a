//! Folder-level OCR: every image directly inside a folder is preprocessed,
//! recognized, and collected into one [`TextManifest`].

use std::path::{Path, PathBuf};

use akcija_core::naming::text_results_file_name;
use akcija_core::{to_json_pretty, ProcessedImage, TextManifest};
use image::GrayImage;

use crate::engine::OcrEngine;
use crate::error::OcrError;
use crate::preprocess::{preprocess, PreprocessOptions, Stage};

/// Extensions treated as images, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "tiff"];

pub struct TextExtractor<E> {
    engine: E,
    options: PreprocessOptions,
    debug_dir: Option<PathBuf>,
}

impl<E: OcrEngine> TextExtractor<E> {
    pub fn new(engine: E, options: PreprocessOptions) -> Self {
        Self {
            engine,
            options,
            debug_dir: None,
        }
    }

    /// Saves every preprocessing stage as `{dir}/{stem}_{stage}.png`.
    #[must_use]
    pub fn with_debug_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.debug_dir = dir;
        self
    }

    /// Decodes, preprocesses, and recognizes one image, returning the
    /// trimmed text.
    ///
    /// # Errors
    ///
    /// Returns [`OcrError::Image`] if the file cannot be decoded, or any
    /// error raised by the engine.
    pub fn extract_text(&self, path: &Path) -> Result<String, OcrError> {
        let img = image::open(path)?;
        let prepared = preprocess(&img, self.options, |stage, stage_img| {
            self.save_stage(path, stage, stage_img);
        });
        let text = self.engine.recognize(&prepared)?;
        Ok(text.trim().to_owned())
    }

    fn save_stage(&self, source: &Path, stage: Stage, img: &GrayImage) {
        let Some(dir) = &self.debug_dir else {
            return;
        };
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dest = dir.join(format!("{stem}_{}.png", stage.name()));
        let saved = std::fs::create_dir_all(dir)
            .map_err(image::ImageError::IoError)
            .and_then(|()| img.save(&dest));
        if let Err(e) = saved {
            tracing::warn!(path = %dest.display(), error = %e, "could not save debug stage");
        }
    }

    /// Runs OCR over every image in `folder`.
    ///
    /// Returns `Ok(None)` when the folder holds no images. Images that fail
    /// to decode or recognize, or that yield no text, are logged and left out
    /// of `processed_images`.
    ///
    /// # Errors
    ///
    /// Returns [`OcrError::Io`] only if `folder` cannot be listed.
    pub fn process_folder(
        &self,
        folder: &Path,
        timestamp: &str,
    ) -> Result<Option<TextManifest>, OcrError> {
        let images = list_images(folder)?;
        if images.is_empty() {
            tracing::info!(folder = %folder.display(), "no image files found");
            return Ok(None);
        }

        let total = images.len();
        let mut processed_images = Vec::new();
        for (i, path) in images.iter().enumerate() {
            let image_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            tracing::debug!(index = i + 1, total, image = %image_name, "processing image");

            match self.extract_text(path) {
                Ok(text) if !text.is_empty() => {
                    tracing::info!(
                        image = %image_name,
                        chars = text.chars().count(),
                        "extracted text"
                    );
                    processed_images.push(ProcessedImage {
                        image_name,
                        extracted_text: text,
                    });
                }
                Ok(_) => {
                    tracing::warn!(image = %image_name, "no text recognized");
                }
                Err(e) => {
                    tracing::warn!(image = %image_name, error = %e, "failed to extract text");
                }
            }
        }

        Ok(Some(TextManifest {
            timestamp: timestamp.to_owned(),
            source_folder: folder.display().to_string(),
            total_images: total,
            processed_images,
        }))
    }
}

/// Image files directly inside `folder`, sorted by file name.
///
/// # Errors
///
/// Returns [`OcrError::Io`] if `folder` cannot be read.
pub fn list_images(folder: &Path) -> Result<Vec<PathBuf>, OcrError> {
    let reader = std::fs::read_dir(folder).map_err(|e| OcrError::io(folder, e))?;
    let mut images = Vec::new();
    for entry in reader {
        let path = entry.map_err(|e| OcrError::io(folder, e))?.path();
        let is_image = path.extension().and_then(|e| e.to_str()).is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        });
        if is_image && path.is_file() {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Label used in the results file name: the folder's own name, resolving
/// `.`-style paths through the filesystem.
fn folder_label(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            folder
                .canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| "images".to_owned())
}

/// Writes `manifest` to `{results_dir}/{folder_name}_text_{timestamp}.json`.
///
/// # Errors
///
/// Returns [`OcrError::Io`] or [`OcrError::Json`] if the file cannot be
/// written.
pub fn save_text_manifest(
    results_dir: &Path,
    manifest: &TextManifest,
) -> Result<PathBuf, OcrError> {
    std::fs::create_dir_all(results_dir).map_err(|e| OcrError::io(results_dir, e))?;
    let label = folder_label(Path::new(&manifest.source_folder));
    let path = results_dir.join(text_results_file_name(&label, &manifest.timestamp));
    let bytes = to_json_pretty(manifest).map_err(|e| OcrError::Json {
        context: "text manifest".to_owned(),
        source: e,
    })?;
    std::fs::write(&path, bytes).map_err(|e| OcrError::io(&path, e))?;
    Ok(path)
}

#[cfg(test)]
#[path = "extractor_test.rs"]
mod tests;
