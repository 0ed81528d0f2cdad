use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Creates a temporary project directory for a test.
pub fn create_test_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Writes `content` to `relative_path` under `dir`, creating parent directories.
pub fn create_test_file(dir: &TempDir, relative_path: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(relative_path);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}
