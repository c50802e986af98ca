//! Filename derivation from image URLs.
//!
//! Output files are named by the URL's trailing path segment, sanitized for
//! Linux filesystems. Two URLs sharing a trailing segment therefore map to
//! the same file; the pool overwrites in that case.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename;

/// Fallback when the URL path yields nothing usable.
const DEFAULT_FILENAME: &str = "image.bin";

/// Derives a safe filename for saving a downloaded image.
///
/// Takes the last path segment of `url` (query string excluded) and
/// sanitizes it. Falls back to `image.bin` for root paths and reserved
/// names.
pub fn derive_filename(url: &str) -> String {
    let raw = match filename_from_url_path(url) {
        Some(c) => c,
        None => return DEFAULT_FILENAME.to_string(),
    };

    let sanitized = sanitize_filename(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}
