use serde::{Deserialize, Serialize};

/// A batch of image URLs waiting to be downloaded.
///
/// Written by the image URL collector into the pending directory, then read,
/// processed, and moved next to the downloaded files by the image fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageManifest {
    pub timestamp: String,
    #[serde(default)]
    pub total_images: usize,
    pub image_urls: Vec<String>,
}

impl ImageManifest {
    #[must_use]
    pub fn new(timestamp: impl Into<String>, image_urls: Vec<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            total_images: image_urls.len(),
            image_urls,
        }
    }
}

/// Text recognized from one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedImage {
    pub image_name: String,
    pub extracted_text: String,
}

/// Result of one OCR run over a folder.
///
/// `total_images` counts the candidate image files found; images that failed
/// recognition are absent from `processed_images` with no error entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextManifest {
    pub timestamp: String,
    pub source_folder: String,
    pub total_images: usize,
    pub processed_images: Vec<ProcessedImage>,
}
