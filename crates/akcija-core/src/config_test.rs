use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.offers_url, "https://www.maxima.lt/pasiulymai");
    assert_eq!(
        cfg.brochure_url,
        "https://www.raskakcija.lt/maxima-akciju-leidinys.htm"
    );
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.offers_dir, PathBuf::from("."));
    assert_eq!(cfg.pending_dir, PathBuf::from("toDownload"));
    assert_eq!(cfg.images_dir, PathBuf::from("images"));
    assert_eq!(cfg.text_results_dir, PathBuf::from("text_results"));
    assert_eq!(cfg.manifest_prefix, "maxima_brochures");
    assert_eq!(cfg.tesseract_cmd, "tesseract");
    assert_eq!(cfg.ocr_language, "lit");
    assert!(!cfg.ocr_binarize);
    assert!(cfg.ocr_debug_dir.is_none());
}

#[test]
fn request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("AKCIJA_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("AKCIJA_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AKCIJA_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(AKCIJA_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn ocr_binarize_accepts_common_spellings() {
    for raw in ["1", "true", "TRUE", "yes", "on"] {
        let mut map = HashMap::new();
        map.insert("AKCIJA_OCR_BINARIZE", raw);
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.ocr_binarize, "expected {raw} to enable binarize");
    }
}

#[test]
fn ocr_binarize_invalid() {
    let mut map = HashMap::new();
    map.insert("AKCIJA_OCR_BINARIZE", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AKCIJA_OCR_BINARIZE"),
        "expected InvalidEnvVar(AKCIJA_OCR_BINARIZE), got: {result:?}"
    );
}

#[test]
fn ocr_debug_dir_blank_is_unset() {
    let mut map = HashMap::new();
    map.insert("AKCIJA_OCR_DEBUG_DIR", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.ocr_debug_dir.is_none());
}

#[test]
fn ocr_debug_dir_override() {
    let mut map = HashMap::new();
    map.insert("AKCIJA_OCR_DEBUG_DIR", "enhanced_images");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.ocr_debug_dir, Some(PathBuf::from("enhanced_images")));
}

#[test]
fn directory_overrides() {
    let mut map = HashMap::new();
    map.insert("AKCIJA_PENDING_DIR", "/tmp/pending");
    map.insert("AKCIJA_IMAGES_DIR", "/tmp/images");
    map.insert("AKCIJA_MANIFEST_PREFIX", "iki_brochures");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.pending_dir, PathBuf::from("/tmp/pending"));
    assert_eq!(cfg.images_dir, PathBuf::from("/tmp/images"));
    assert_eq!(cfg.manifest_prefix, "iki_brochures");
}
