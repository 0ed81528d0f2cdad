use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::io::load_snapshot_record;
use crate::models::SnapshotContent;
use crate::render::SnapshotFormatter;
use crate::snapfile::{SnapshotPaths, is_snapshot_file};

use super::{ContentProvider, PreviewContext, error_message};

const SELECT_FILE: &str = "<div>Select a snapshot file or a test file</div>";

/// Shows every snapshot in a `.snap` file, unfiltered.
///
/// Works with the snapshot file itself open or with the test file next to
/// it. Opening anything else keeps the previous preview.
#[derive(Debug)]
pub struct SnapshotFilePreviewProvider {
    formatter: SnapshotFormatter,
    rendered: HashMap<PathBuf, String>,
    current: String,
}

impl SnapshotFilePreviewProvider {
    pub fn new(formatter: SnapshotFormatter) -> Self {
        Self {
            formatter,
            rendered: HashMap::new(),
            current: SELECT_FILE.to_string(),
        }
    }

    fn snapshot_file_for(source: &Path) -> Option<PathBuf> {
        if is_snapshot_file(source) {
            return Some(source.to_path_buf());
        }
        let snap = SnapshotPaths::for_source(source).snapshot_file;
        snap.exists().then_some(snap)
    }
}

impl ContentProvider for SnapshotFilePreviewProvider {
    fn provide_content(&mut self, ctx: &PreviewContext) -> String {
        let Some(snap) = ctx.source_path.and_then(Self::snapshot_file_for) else {
            return self.current.clone();
        };

        let html = match self.rendered.get(&snap) {
            Some(html) => html.clone(),
            None => match load_snapshot_record(&snap) {
                Ok(record) => {
                    let html = self
                        .formatter
                        .format(&SnapshotContent::Record(record), &[]);
                    self.rendered.insert(snap, html.clone());
                    html
                }
                Err(e) => {
                    log::warn!("{e}");
                    error_message(&e)
                }
            },
        };

        self.current = html.clone();
        html
    }

    fn on_invalidate(&mut self, changed: Option<&Path>) {
        match changed {
            Some(path) => {
                self.rendered.remove(path);
            }
            None => self.rendered.clear(),
        }
    }
}
