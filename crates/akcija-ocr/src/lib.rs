pub mod engine;
pub mod error;
pub mod extractor;
pub mod preprocess;

pub use engine::{OcrEngine, TesseractEngine};
pub use error::OcrError;
pub use extractor::{save_text_manifest, TextExtractor};
pub use preprocess::{preprocess, PreprocessOptions, Stage};
