//! OCR backends.

use std::io::{Cursor, Write};
use std::process::{Command, Stdio};

use image::{GrayImage, ImageFormat};

use crate::error::OcrError;

/// Turns a preprocessed grayscale image into text.
pub trait OcrEngine {
    /// # Errors
    ///
    /// Returns an [`OcrError`] when recognition cannot be performed.
    fn recognize(&self, image: &GrayImage) -> Result<String, OcrError>;
}

/// Runs the `tesseract` executable, piping the image in as PNG on stdin and
/// reading the recognized text from stdout.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    command: String,
    language: String,
}

impl TesseractEngine {
    #[must_use]
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }

    /// Arguments passed to the executable: `stdin stdout -l <language>`.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        vec![
            "stdin".to_owned(),
            "stdout".to_owned(),
            "-l".to_owned(),
            self.language.clone(),
        ]
    }

    fn engine_error(&self, source: std::io::Error) -> OcrError {
        OcrError::Engine {
            command: self.command.clone(),
            source,
        }
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &GrayImage) -> Result<String, OcrError> {
        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        let mut child = Command::new(&self.command)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.engine_error(e))?;

        // An engine that exits early breaks the pipe; its exit status and
        // stderr take precedence over the write error.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(&png),
            None => Ok(()),
        };

        let output = child.wait_with_output().map_err(|e| self.engine_error(e))?;
        if !output.status.success() {
            return Err(OcrError::EngineFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        written.map_err(|e| self.engine_error(e))?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
