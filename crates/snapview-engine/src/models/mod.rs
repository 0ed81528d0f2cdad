pub mod live_message;
pub mod resolved_location;
pub mod snapshot_record;

pub use live_message::{LiveContent, LiveMessage};
pub use resolved_location::ResolvedLocation;
pub use snapshot_record::{
    CSS_CLASS_KEY, DECORATOR_KEY, DECORATOR_PLACEHOLDER, SnapshotContent, SnapshotRecord,
};
