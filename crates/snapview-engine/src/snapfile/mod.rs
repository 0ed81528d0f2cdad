//! Snapshot files on disk: where they live and how they are read.

pub mod cursor;
pub mod parser;
pub mod paths;

pub use parser::{SnapFileError, parse_snap_file};
pub use paths::{
    SnapshotPaths, is_snapshot_file, is_test_file, strip_variant_tags, test_file_key,
};
