//! Disk writes for downloaded bodies.
//!
//! Bodies are written to a `.part` sibling and renamed into place, so a
//! crash mid-write never leaves a truncated file under the final name.
//! Rename also gives last-write-wins semantics for colliding filenames.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Creates `dir` (and parents) if missing. No error if it already exists.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("create directory: {}", dir.display()))
}

/// Writes `bytes` to `final_path` via a temp file and atomic rename.
/// Returns the number of bytes written. Overwrites an existing file.
pub fn write_atomic(final_path: &Path, bytes: &[u8]) -> Result<u64> {
    let tmp = part_path(final_path);
    fs::write(&tmp, bytes)
        .with_context(|| format!("write temp file: {}", tmp.display()))?;
    fs::rename(&tmp, final_path).with_context(|| {
        format!("rename {} to {}", tmp.display(), final_path.display())
    })?;
    Ok(bytes.len() as u64)
}

/// Temp path for a download: appends `.part` to the final path.
fn part_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(".part");
    PathBuf::from(o)
}
