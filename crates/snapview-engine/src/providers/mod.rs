//! Sources of preview pane content.
//!
//! Each provider turns the current editor state into an HTML string. The
//! host asks for content whenever the caret moves (after debouncing) and
//! tells providers when files on disk change.

use std::path::Path;

use crate::session::Resolution;

pub mod component;
pub mod file_snapshots;
pub mod live;
pub mod snap_preview;

pub use component::{ComponentPreviewProvider, DEFAULT_STORY_SERVER};
pub use file_snapshots::FileSnapshotProvider;
pub use live::{LIVE_EXPIRY, LiveSnapshotProvider};
pub use snap_preview::SnapshotFilePreviewProvider;

/// What the editor currently shows.
#[derive(Debug, Clone, Copy)]
pub struct PreviewContext<'a> {
    /// The active document, if any.
    pub source_path: Option<&'a Path>,
    /// Resolution of the caret in the active document.
    pub resolution: &'a Resolution,
}

impl<'a> PreviewContext<'a> {
    pub fn new(source_path: Option<&'a Path>, resolution: &'a Resolution) -> Self {
        Self {
            source_path,
            resolution,
        }
    }
}

pub trait ContentProvider {
    /// Produces the HTML for the preview pane.
    fn provide_content(&mut self, ctx: &PreviewContext) -> String;

    /// Drops cached content for `changed`, or for everything when `None`.
    fn on_invalidate(&mut self, _changed: Option<&Path>) {}
}

/// Shows a failure in the pane instead of the content.
pub(crate) fn error_message(err: &dyn std::fmt::Display) -> String {
    format!(
        "<div class=\"ui red label\">{}</div>",
        html_escape::encode_text(&err.to_string())
    )
}
