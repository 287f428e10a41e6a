//! `akcija ocr <FOLDER>`.

use std::path::{Path, PathBuf};

use akcija_core::AppConfig;
use akcija_ocr::{save_text_manifest, PreprocessOptions, TesseractEngine, TextExtractor};

/// Runs the text extractor on a blocking thread; recognition shells out to
/// the OCR executable once per image.
pub(crate) async fn run_ocr(
    config: AppConfig,
    folder: PathBuf,
    binarize: bool,
) -> anyhow::Result<()> {
    tokio::task::spawn_blocking(move || extract_folder(&config, &folder, binarize)).await?
}

fn extract_folder(config: &AppConfig, folder: &Path, binarize: bool) -> anyhow::Result<()> {
    let engine = TesseractEngine::new(config.tesseract_cmd.clone(), config.ocr_language.clone());
    let options = PreprocessOptions {
        binarize: binarize || config.ocr_binarize,
    };
    let extractor =
        TextExtractor::new(engine, options).with_debug_dir(config.ocr_debug_dir.clone());

    let timestamp = akcija_core::batch_timestamp();
    let Some(manifest) = extractor.process_folder(folder, &timestamp)? else {
        return Ok(());
    };

    let path = save_text_manifest(&config.text_results_dir, &manifest)?;
    tracing::info!(
        path = %path.display(),
        processed = manifest.processed_images.len(),
        total = manifest.total_images,
        "saved text results"
    );
    Ok(())
}
