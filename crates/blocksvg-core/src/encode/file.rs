//! Persisting SVG documents to disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// File name used when the source has no usable stem.
pub const FALLBACK_FILE_NAME: &str = "converted.svg";

/// Errors that can occur while writing an SVG file.
#[derive(Debug, Error)]
#[error("Failed to write {path}: {source}")]
pub struct WriteError {
    /// Destination that could not be written
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Write `svg` to `path` as UTF-8, replacing any existing file.
///
/// The document is written verbatim. On failure the caller still owns the
/// text and may retry with another path.
pub fn write_svg(path: impl AsRef<Path>, svg: &str) -> Result<(), WriteError> {
    let path = path.as_ref();
    fs::write(path, svg.as_bytes()).map_err(|source| WriteError {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = svg.len(), "wrote svg");
    Ok(())
}

/// Derive the output path for a source image: same directory, `.svg` extension.
///
/// `photos/cat.png` becomes `photos/cat.svg`. A path without a file stem
/// falls back to [`FALLBACK_FILE_NAME`].
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    match input.file_stem() {
        Some(stem) if !stem.is_empty() => input.with_extension("svg"),
        _ => input.parent().unwrap_or(input).join(FALLBACK_FILE_NAME),
    }
}
