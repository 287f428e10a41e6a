use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; the lookup indirection lets tests drive this
/// with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        parse_flag(&raw).ok_or_else(|| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got \"{raw}\""),
        })
    };

    let log_level = or_default("AKCIJA_LOG_LEVEL", "info");
    let offers_url = or_default("AKCIJA_OFFERS_URL", "https://www.maxima.lt/pasiulymai");
    let brochure_url = or_default(
        "AKCIJA_BROCHURE_URL",
        "https://www.raskakcija.lt/maxima-akciju-leidinys.htm",
    );
    let user_agent = or_default("AKCIJA_USER_AGENT", DEFAULT_USER_AGENT);
    let request_timeout_secs = parse_u64("AKCIJA_REQUEST_TIMEOUT_SECS", "30")?;

    let offers_dir = PathBuf::from(or_default("AKCIJA_OFFERS_DIR", "."));
    let pending_dir = PathBuf::from(or_default("AKCIJA_PENDING_DIR", "toDownload"));
    let images_dir = PathBuf::from(or_default("AKCIJA_IMAGES_DIR", "images"));
    let text_results_dir = PathBuf::from(or_default("AKCIJA_TEXT_RESULTS_DIR", "text_results"));
    let manifest_prefix = or_default("AKCIJA_MANIFEST_PREFIX", "maxima_brochures");

    let tesseract_cmd = or_default("AKCIJA_TESSERACT_CMD", "tesseract");
    let ocr_language = or_default("AKCIJA_OCR_LANGUAGE", "lit");
    let ocr_binarize = parse_bool("AKCIJA_OCR_BINARIZE", "false")?;
    let ocr_debug_dir = lookup("AKCIJA_OCR_DEBUG_DIR")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        log_level,
        offers_url,
        brochure_url,
        user_agent,
        request_timeout_secs,
        offers_dir,
        pending_dir,
        images_dir,
        text_results_dir,
        manifest_prefix,
        tesseract_cmd,
        ocr_language,
        ocr_binarize,
        ocr_debug_dir,
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
