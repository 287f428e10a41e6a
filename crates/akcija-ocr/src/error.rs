use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("OCR engine `{command}` I/O failure: {source}")]
    Engine {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("OCR engine exited with {status}: {stderr}")]
    EngineFailed { status: String, stderr: String },

    #[error("JSON error for {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl OcrError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
