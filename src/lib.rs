//! foldersort - sort a directory's top-level entries into category folders
//!
//! This library classifies files by extension, moves them into per-category
//! subdirectories, sweeps top-level folders into `Folders`, and reports
//! progress and running counts while it works. Runs can execute on a
//! background worker with cancellation.

pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod output;
pub mod progress;
pub mod worker;

pub use config::{ConfigError, ConflictPolicy, OrganizeConfig};
pub use file_category::{Category, CategoryTable};
pub use file_organizer::{
    CancellationToken, FileOrganizer, OrganizeError, OrganizeResult, organize,
};
pub use progress::{
    CategoryCounts, CategoryCountsEvent, EventSink, OrganizeEvent, ProgressEvent, RunSummary,
};

pub use cli::{Args, run_cli};
