//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "snapview",
    version,
    about = "Preview the stored snapshots of the test under a caret."
)]
pub struct SnapviewArgs {
    /// Configuration file to use instead of ~/.config/snapview/config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Project root; `public/` under it is the default asset directory.
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// A caret in a file, as a byte offset or a 1-based line and column.
#[derive(Debug, Clone, Args)]
pub struct CaretArgs {
    /// The test file.
    #[arg(required = true)]
    pub file: PathBuf,

    /// Byte offset of the caret.
    #[arg(long, conflicts_with = "line")]
    pub offset: Option<usize>,

    /// 1-based line of the caret.
    #[arg(long)]
    pub line: Option<usize>,

    /// 1-based column of the caret, in characters.
    #[arg(long, default_value_t = 1, requires = "line")]
    pub column: usize,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the test, suites and snapshot names around the caret as JSON.
    Resolve {
        #[command(flatten)]
        caret: CaretArgs,
    },
    /// Render the stored snapshots of the test around the caret.
    Render {
        #[command(flatten)]
        caret: CaretArgs,
        /// Write the HTML here instead of stdout.
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Render every snapshot in a `.snap` file, or the one next to a test file.
    PreviewSnap {
        #[arg(required = true)]
        file: PathBuf,
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Print the component explorer page for the story around the caret.
    Story {
        #[command(flatten)]
        caret: CaretArgs,
    },
    /// Build, and optionally run, the command that re-records snapshots.
    Update {
        #[command(flatten)]
        caret: CaretArgs,
        /// Update every test in the suite instead of the one at the caret.
        #[arg(long)]
        suite: bool,
        /// Run the command through `sh -c` instead of printing it.
        #[arg(long)]
        run: bool,
    },
    /// List the lines that get "update snapshots" actions.
    Lenses {
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Read live snapshot messages (one JSON object per line) from stdin and
    /// print the preview of `file` each time a burst settles, and at the end.
    Live {
        #[arg(required = true)]
        file: PathBuf,
    },
}
