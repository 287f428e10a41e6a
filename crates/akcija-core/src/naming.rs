//! Batch timestamps, output file names, and the JSON layout shared by every
//! file the pipelines write.

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Local wall-clock timestamp in `YYYYMMDD_HHMMSS` form.
#[must_use]
pub fn batch_timestamp() -> String {
    format_timestamp(&Local::now())
}

#[must_use]
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// `{prefix}_{timestamp}.json`, used for image URL manifests.
#[must_use]
pub fn manifest_file_name(prefix: &str, timestamp: &str) -> String {
    format!("{prefix}_{timestamp}.json")
}

/// `scraped_data_{timestamp}.json`, used for extracted offer sections.
#[must_use]
pub fn offers_file_name(timestamp: &str) -> String {
    manifest_file_name("scraped_data", timestamp)
}

/// `{folder_name}_text_{timestamp}.json`, used for OCR results.
#[must_use]
pub fn text_results_file_name(folder_name: &str, timestamp: &str) -> String {
    format!("{folder_name}_text_{timestamp}.json")
}

/// Serializes `value` as UTF-8 JSON with four-space indentation.
///
/// Non-ASCII text (Lithuanian product names, OCR output) is written as-is,
/// never `\u`-escaped.
///
/// # Errors
///
/// Returns the underlying `serde_json` error if `value` fails to serialize.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}
