//! HTML rendering of stored snapshots for the preview pane.

pub mod formatter;
pub mod rewrite;
pub mod shell;
pub mod structured;
pub mod style_object;

pub use formatter::{RenderOptions, SnapshotFormatter, display_label, passes_filter};
pub use rewrite::{normalize_attributes, rewrite_assets, rewrite_css_urls};
pub use shell::{NO_TEST_FOUND, missing_snapshots};
pub use structured::StructuredMode;
pub use style_object::StyleObjectError;
