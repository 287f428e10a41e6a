use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub offers_url: String,
    pub brochure_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub offers_dir: PathBuf,
    pub pending_dir: PathBuf,
    pub images_dir: PathBuf,
    pub text_results_dir: PathBuf,
    pub manifest_prefix: String,
    pub tesseract_cmd: String,
    pub ocr_language: String,
    pub ocr_binarize: bool,
    /// When set, every preprocessing stage is saved here as a PNG.
    pub ocr_debug_dir: Option<PathBuf>,
}
