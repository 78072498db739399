//! Collision-resistant, filesystem-safe filename generation.

use chrono::{SecondsFormat, Utc};

/// Characters rejected by at least one common filesystem.
const ILLEGAL_CHARS: &[char] = &['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>', '\0'];

/// Maximum length (in characters) of the title-derived segment.
const TITLE_SEGMENT_MAX: usize = 50;

/// Fixed extension for stored post content.
pub const CONTENT_EXT: &str = "txt";

/// Derive a filesystem-safe filename from a post title and its source URL.
///
/// Shape: `{sanitized title}_{8 hex chars of md5(url)}_{timestamp}.txt`,
/// where the title segment is at most 50 characters (falling back to
/// `"untitled"` when empty) and the timestamp has `:` and `.` replaced
/// with `-`.
///
/// Uniqueness is probabilistic: the URL digest plus the millisecond
/// timestamp make collisions unlikely, not impossible. Two fetches of the
/// same URL in the same millisecond would collide; that risk is accepted.
pub fn generate_filename(url: &str, title: &str) -> String {
    let base = sanitize_title(title);

    let digest = md5::compute(url.as_bytes());
    let url_hash: String = format!("{digest:x}").chars().take(8).collect();

    let timestamp = Utc::now()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");

    format!("{base}_{url_hash}_{timestamp}.{CONTENT_EXT}")
}

/// Strip characters illegal in filenames and truncate to the segment limit,
/// falling back to `"untitled"` for empty input.
fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c) && !c.is_control())
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned.chars().take(TITLE_SEGMENT_MAX).collect()
    }
}
