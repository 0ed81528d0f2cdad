use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

pub const SNAPSHOT_DIR: &str = "__snapshots__";
pub const SNAPSHOT_EXTENSION: &str = "snap";
pub const HTML_OUTPUT: &str = "output.html";

fn variant_tag_regex() -> &'static Regex {
    static VARIANT_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    VARIANT_TAG_REGEX.get_or_init(|| Regex::new(r"@[^_.-]+").expect("Invalid variant tag regex"))
}

/// Where the artifacts belonging to one test file live.
///
/// For `src/Widget@dark.test.tsx`:
///
/// | artifact  | path                                          |
/// |-----------|-----------------------------------------------|
/// | snapshots | `src/__snapshots__/Widget.test.tsx.snap`      |
/// | styles    | `src/__snapshots__/Widget.test.css`           |
/// | html      | `src/__snapshots__/output.html`               |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPaths {
    pub snapshot_dir: PathBuf,
    pub snapshot_file: PathBuf,
    pub style_file: PathBuf,
}

impl SnapshotPaths {
    pub fn for_source(source: &Path) -> Self {
        let snapshot_dir = source
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(SNAPSHOT_DIR);

        let file_name = source
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        let file_name = strip_variant_tags(&file_name);
        let snapshot_name = format!("{file_name}.{SNAPSHOT_EXTENSION}");

        // `Widget.test.tsx.snap` -> `Widget.test.css`
        let style_stem = Path::new(&file_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            snapshot_file: snapshot_dir.join(snapshot_name),
            style_file: snapshot_dir.join(format!("{style_stem}.css")),
            snapshot_dir,
        }
    }

    pub fn html_output(&self) -> PathBuf {
        self.snapshot_dir.join(HTML_OUTPUT)
    }
}

/// Removes `@variant` tags from a file name.
pub fn strip_variant_tags(file_name: &str) -> String {
    variant_tag_regex().replace_all(file_name, "").into_owned()
}

pub fn is_snapshot_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SNAPSHOT_EXTENSION)
}

/// Test files carry `.test.` in their name, e.g. `Widget.test.tsx`.
pub fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().contains(".test."))
}

/// The name live snapshots are grouped under: the file name without its
/// last extension.
pub fn test_file_key(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
