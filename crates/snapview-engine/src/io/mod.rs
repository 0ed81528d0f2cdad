use std::fs;
use std::path::{Path, PathBuf};

use crate::models::SnapshotRecord;
use crate::render::rewrite_css_urls;
use crate::snapfile::{SnapFileError, parse_snap_file};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid snapshot file {path}: {source}")]
    InvalidSnapshotFile {
        path: PathBuf,
        source: SnapFileError,
    },
}

/// Read a text file, reporting a missing file as [`IoError::NotFound`].
pub fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Read and parse a `.snap` module.
pub fn load_snapshot_record(path: &Path) -> Result<SnapshotRecord, IoError> {
    let text = read_file(path)?;
    parse_snap_file(&text).map_err(|source| IoError::InvalidSnapshotFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a style sidecar with its `url()` references pointed at `asset_base`.
///
/// A missing sidecar is not an error; it yields `None`.
pub fn load_styles(path: &Path, asset_base: &str) -> Result<Option<String>, IoError> {
    match read_file(path) {
        Ok(css) => Ok(Some(rewrite_css_urls(&css, asset_base))),
        Err(IoError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Write rendered HTML to `path`, creating parent directories.
pub fn write_html(path: &Path, html: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(path, html).map_err(IoError::Io)
}
