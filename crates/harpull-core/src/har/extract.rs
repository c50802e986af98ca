//! Extract image URLs from a parsed HAR document.

use anyhow::{Context, Result};
use std::path::Path;

use super::parse::{HarEntry, HarLog};

/// Reads a HAR file and returns the URLs of all entries whose response
/// mime type contains "image", in entry order.
///
/// Entries missing `request.url` or `response.content.mimeType` are
/// skipped; they were never downloads we could attempt, so they are not
/// counted as failures either.
pub fn extract_image_urls(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read HAR file: {}", path.display()))?;
    let har: HarLog = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse HAR JSON: {}", path.display()))?;

    let urls: Vec<String> = har
        .log
        .entries
        .iter()
        .filter_map(image_url)
        .collect();

    tracing::debug!(
        har = %path.display(),
        entries = har.log.entries.len(),
        images = urls.len(),
        "extracted image URLs"
    );
    Ok(urls)
}

/// URL of an entry if it is a well-formed image entry, else None.
fn image_url(entry: &HarEntry) -> Option<String> {
    let mime = entry.response.as_ref()?.content.as_ref()?.mime_type.as_ref()?;
    if !mime.contains("image") {
        return None;
    }
    entry.request.as_ref()?.url.clone()
}
