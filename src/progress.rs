//! Progress reporting for organize runs.
//!
//! A run reports through an [`EventSink`]. The organizer emits a
//! [`ProgressEvent`] after every file it processes and a snapshot of the
//! running [`CategoryCounts`] after every entry it moves. The background worker
//! closes the stream with a terminal `Finished` or `Failed` event.

use crate::file_category::Category;
use chrono::{DateTime, Utc};
use crossbeam_channel::Sender;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::path::PathBuf;

/// Per-category tally of moved entries.
///
/// Every category starts at zero. Counts only ever go up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    counts: [usize; Category::COUNT],
}

impl CategoryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one moved entry for `category`.
    pub fn increment(&mut self, category: Category) {
        self.counts[category.index()] += 1;
    }

    pub fn get(&self, category: Category) -> usize {
        self.counts[category.index()]
    }

    /// Sum over all categories.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Iterates `(category, count)` pairs in declaration order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        Category::ALL.iter().map(|c| (*c, self.get(*c)))
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::COUNT))?;
        for (category, count) in self.iter() {
            map.serialize_entry(category.dir_name(), &count)?;
        }
        map.end()
    }
}

/// Emitted after each top-level file has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    /// Files handled so far in this run.
    pub processed: usize,
    /// Files in the run's snapshot. Subdirectories are not included.
    pub total: usize,
}

impl ProgressEvent {
    /// Completion percentage in `0.0..=100.0`.
    ///
    /// A run with nothing to do is complete, so `total == 0` yields `100.0`.
    ///
    /// ```
    /// use foldersort::progress::ProgressEvent;
    ///
    /// assert_eq!(ProgressEvent { processed: 1, total: 4 }.percent(), 25.0);
    /// assert_eq!(ProgressEvent { processed: 0, total: 0 }.percent(), 100.0);
    /// ```
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.processed.min(self.total) as f64 / self.total as f64) * 100.0
    }
}

/// Full snapshot of the counts after a successful move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCountsEvent {
    pub counts: CategoryCounts,
}

/// An entry left in place because its destination name was already taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub name: String,
    pub destination: PathBuf,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub directory: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Files in the snapshot (the `total` of every progress event).
    pub files_total: usize,
    pub files_moved: usize,
    pub folders_moved: usize,
    pub skipped: Vec<SkippedEntry>,
    pub counts: CategoryCounts,
}

/// Everything a run reports, in emission order.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OrganizeEvent {
    Progress(ProgressEvent),
    Counts(CategoryCountsEvent),
    Skipped(SkippedEntry),
    /// Terminal: the run completed.
    Finished(RunSummary),
    /// Terminal: the run stopped on an error or cancellation.
    Failed { message: String },
}

impl OrganizeEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished(_) | Self::Failed { .. })
    }
}

/// Receives events from a run.
///
/// Implementations must not block the organizer for long; delivery order must
/// be preserved.
pub trait EventSink {
    fn emit(&mut self, event: OrganizeEvent);
}

impl EventSink for Vec<OrganizeEvent> {
    fn emit(&mut self, event: OrganizeEvent) {
        self.push(event);
    }
}

impl EventSink for Sender<OrganizeEvent> {
    fn emit(&mut self, event: OrganizeEvent) {
        // A dropped receiver means nobody is listening; the run carries on.
        let _ = self.send(event);
    }
}
