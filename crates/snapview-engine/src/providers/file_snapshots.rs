use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use crate::io::{IoError, load_snapshot_record, load_styles, write_html};
use crate::models::{ResolvedLocation, SnapshotContent};
use crate::render::{NO_TEST_FOUND, SnapshotFormatter, missing_snapshots};
use crate::snapfile::SnapshotPaths;

use super::{ContentProvider, PreviewContext, error_message};

/// Shows the stored snapshots of the test under the caret.
///
/// Parsed snapshot files and style sidecars are cached by path until
/// invalidated.
#[derive(Debug)]
pub struct FileSnapshotProvider {
    formatter: SnapshotFormatter,
    save_html: bool,
    records: HashMap<PathBuf, SnapshotContent>,
    styles: HashMap<PathBuf, Option<String>>,
}

impl FileSnapshotProvider {
    pub fn new(formatter: SnapshotFormatter) -> Self {
        Self {
            formatter,
            save_html: false,
            records: HashMap::new(),
            styles: HashMap::new(),
        }
    }

    /// Also write every rendered preview to `__snapshots__/output.html`.
    pub fn with_save_html(mut self, save_html: bool) -> Self {
        self.save_html = save_html;
        self
    }

    /// Renders the snapshots of `location`, found next to `source`.
    pub fn render(
        &mut self,
        source: &Path,
        location: &ResolvedLocation,
    ) -> Result<String, IoError> {
        let paths = SnapshotPaths::for_source(source);

        let content = match self.records.entry(paths.snapshot_file.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                log::debug!("loading snapshots from {}", paths.snapshot_file.display());
                entry.insert(SnapshotContent::Record(load_snapshot_record(
                    &paths.snapshot_file,
                )?))
            }
        };

        let styles = match self.styles.entry(paths.style_file.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(load_styles(
                &paths.style_file,
                &self.formatter.options().asset_base,
            )?),
        };

        let html = self.formatter.format_with_css(
            content,
            &location.snapshot_names,
            styles.as_deref().unwrap_or_default(),
        );

        if self.save_html
            && let Err(e) = write_html(&paths.html_output(), &html)
        {
            log::warn!("could not save preview html: {e}");
        }

        Ok(html)
    }
}

impl ContentProvider for FileSnapshotProvider {
    fn provide_content(&mut self, ctx: &PreviewContext) -> String {
        let (Some(source), Some(location)) = (ctx.source_path, ctx.resolution.location()) else {
            return NO_TEST_FOUND.to_string();
        };

        match self.render(source, location) {
            Ok(html) => html,
            Err(IoError::NotFound(path)) => missing_snapshots(&path),
            Err(e) => {
                log::warn!("{e}");
                error_message(&e)
            }
        }
    }

    fn on_invalidate(&mut self, changed: Option<&Path>) {
        match changed {
            Some(path) => {
                self.records.remove(path);
                self.styles.remove(path);
            }
            None => {
                self.records.clear();
                self.styles.clear();
            }
        }
    }
}
