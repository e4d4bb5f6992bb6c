//! MIME utilities for file uploads

use std::path::Path;

pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Lowercases a MIME type and strips parameters, fixing the common
/// `image/jpg` misspelling.
#[must_use]
pub fn canonicalize_mime(mime: &str) -> String {
    let main = mime
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    match main.as_str() {
        "image/jpg" => "image/jpeg".to_string(),
        "" => FALLBACK_MIME.to_string(),
        other => other.to_string(),
    }
}

#[must_use]
pub fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .map_or_else(|| FALLBACK_MIME.to_string(), ToString::to_string)
}
