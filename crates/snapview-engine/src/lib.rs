pub mod commands;
pub mod debounce;
pub mod io;
pub mod models;
pub mod providers;
pub mod render;
pub mod scanning;
pub mod session;
pub mod snapfile;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use commands::{CommandError, UpdateScope, build_update_command, parse_passing_count};
pub use io::IoError;
pub use models::{LiveMessage, ResolvedLocation, SnapshotContent, SnapshotRecord};
pub use providers::{ContentProvider, PreviewContext};
pub use render::{RenderOptions, SnapshotFormatter, StructuredMode};
pub use scanning::{CallKind, CallVocabulary, locate_test};
pub use session::{Resolution, Resolver};
