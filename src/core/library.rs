use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use crate::error::ScanError;

/// Extensions picked up when walking directories.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "mp3", "flac", "ogg", "oga", "opus", "m4a", "mp4", "wv", "ape", "wav", "aiff", "aif",
];

/// Collect audio files under `root`.
///
/// - A file root is returned as-is, whatever its extension.
/// - A directory root is walked recursively, keeping files whose extension
///   is in `extensions` (case-insensitive).
pub fn scan_audio(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::NotFound(root.to_path_buf()));
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut out = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type().is_file() && extensions.iter().any(|ext| has_extension(path, ext)) {
            out.push(path.to_path_buf());
        } else {
            trace!(path = %path.display(), "skipped");
        }
    }

    Ok(out)
}

pub(crate) fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}
