/// Classification and relocation of top-level directory entries.
///
/// A run takes one snapshot of the target directory, moves every file into the
/// subdirectory of its category, then moves the remaining subdirectories into
/// `Folders`. Progress and running counts are reported through an
/// [`EventSink`] as each entry is handled.
///
/// Runs are not transactional. An error stops the run; entries moved before it
/// stay in their category folder and everything else stays where it was.
use crate::config::{ConfigError, ConflictPolicy, EntryFilter, OrganizeConfig};
use crate::file_category::{Category, CategoryTable};
use crate::progress::{
    CategoryCounts, CategoryCountsEvent, EventSink, OrganizeEvent, ProgressEvent, RunSummary,
    SkippedEntry,
};
use chrono::Utc;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during an organize run.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The target is missing, not a directory, or cannot be listed. Nothing
    /// has been moved when this is returned.
    #[error("cannot read directory {}: {source}", .path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A category directory could not be created.
    #[error("failed to create directory {}: {source}", .path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The destination already holds an entry with the same name.
    #[error(
        "cannot move {} to {}: destination already exists",
        .entry.display(),
        .destination.display()
    )]
    MoveConflict { entry: PathBuf, destination: PathBuf },

    /// The rename itself failed (permissions, full disk, vanished source).
    #[error("failed to move {} to {}: {error}", .entry.display(), .destination.display())]
    MoveFailure {
        entry: PathBuf,
        destination: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// The run was cancelled between two entries.
    #[error("cancelled after {processed} of {total} files")]
    Cancelled { processed: usize, total: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not start the organizer thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    #[error("the organizer thread panicked")]
    WorkerPanicked,
}

/// Result type for organize operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Shared flag used to stop a run on the next entry boundary.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the run stop before its next entry.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The top-level entries of a directory, captured once before any move.
///
/// Subdirectories named after a category destination are left out, so the
/// folders a run creates are never picked up again.
#[derive(Debug, Clone, Default)]
pub struct DirectorySnapshot {
    /// Regular files (symlinks followed), sorted by name.
    pub files: Vec<PathBuf>,
    /// Directories to be swept into `Folders`, sorted by name.
    pub subdirectories: Vec<PathBuf>,
}

impl DirectorySnapshot {
    /// Lists the top level of `root`, keeping only entries `filter` allows.
    ///
    /// Entries that are neither files nor directories (broken symlinks,
    /// sockets) are ignored.
    pub fn scan(root: &Path, filter: &EntryFilter) -> OrganizeResult<Self> {
        let access_error = |source| OrganizeError::DirectoryAccess {
            path: root.to_path_buf(),
            source,
        };

        let metadata = fs::metadata(root).map_err(access_error)?;
        if !metadata.is_dir() {
            return Err(access_error(std::io::Error::new(
                ErrorKind::InvalidInput,
                "not a directory",
            )));
        }

        let mut snapshot = Self::default();
        for entry in fs::read_dir(root).map_err(access_error)? {
            let entry = entry.map_err(access_error)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !filter.allows(&name) {
                debug!(entry = %name, "excluded by filter");
                continue;
            }

            let path = entry.path();
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => snapshot.files.push(path),
                Ok(meta) if meta.is_dir() => {
                    if !Category::is_destination_name(&name) {
                        snapshot.subdirectories.push(path);
                    }
                }
                Ok(_) => debug!(entry = %name, "ignoring special file"),
                Err(e) => debug!(entry = %name, error = %e, "ignoring unreadable entry"),
            }
        }

        snapshot.files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        snapshot
            .subdirectories
            .sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(snapshot)
    }
}

enum MoveOutcome {
    Moved(PathBuf),
    Conflict(PathBuf),
}

/// Sorts the top level of a directory into category subfolders.
#[derive(Debug, Clone, Default)]
pub struct FileOrganizer {
    table: CategoryTable,
    filter: EntryFilter,
    on_conflict: ConflictPolicy,
}

impl FileOrganizer {
    /// An organizer with the standard table, no filters and the `Abort`
    /// conflict policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an organizer from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `OrganizeError::Config` if a filter pattern does not compile.
    pub fn from_config(config: &OrganizeConfig) -> OrganizeResult<Self> {
        Ok(Self {
            table: CategoryTable::standard(),
            filter: EntryFilter::compile(&config.filters)?,
            on_conflict: config.organize.on_conflict,
        })
    }

    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.on_conflict = policy;
        self
    }

    pub fn conflict_policy(&self) -> ConflictPolicy {
        self.on_conflict
    }

    /// Organizes the top level of `directory`.
    ///
    /// For each file, in name order, the file is moved into its category
    /// folder and a [`ProgressEvent`] followed by a [`CategoryCountsEvent`] is
    /// emitted. Subdirectories are then moved into `Folders`, each followed by
    /// a [`CategoryCountsEvent`] only; they do not count towards `total`.
    ///
    /// `cancel` is checked before every entry.
    ///
    /// # Errors
    ///
    /// * `DirectoryAccess` if `directory` cannot be listed (nothing moved)
    /// * `DirectoryCreationFailed` if a category folder cannot be created
    /// * `MoveConflict` if a destination name is taken and the policy is `Abort`
    /// * `MoveFailure` if a rename fails
    /// * `Cancelled` if `cancel` was set
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use foldersort::file_organizer::{CancellationToken, FileOrganizer};
    /// use foldersort::progress::OrganizeEvent;
    /// use std::path::Path;
    ///
    /// let mut events: Vec<OrganizeEvent> = Vec::new();
    /// let summary = FileOrganizer::new()
    ///     .organize(Path::new("/path/to/Downloads"), &mut events, &CancellationToken::new())
    ///     .expect("organize failed");
    /// println!("moved {} files", summary.files_moved);
    /// ```
    pub fn organize<S: EventSink + ?Sized>(
        &self,
        directory: &Path,
        sink: &mut S,
        cancel: &CancellationToken,
    ) -> OrganizeResult<RunSummary> {
        let started_at = Utc::now();
        let snapshot = DirectorySnapshot::scan(directory, &self.filter)?;
        let total = snapshot.files.len();
        info!(
            directory = %directory.display(),
            files = total,
            folders = snapshot.subdirectories.len(),
            "organizing directory"
        );

        let mut counts = CategoryCounts::new();
        let mut skipped = Vec::new();
        let mut processed = 0;
        let mut files_moved = 0;

        for file in &snapshot.files {
            if cancel.is_cancelled() {
                info!(processed, total, "run cancelled");
                return Err(OrganizeError::Cancelled { processed, total });
            }

            let category = self.table.classify_name(&entry_name(file));
            let category_dir = Self::ensure_category_dir(directory, category)?;
            let moved = self.relocate(file, &category_dir, sink, &mut skipped)?;
            processed += 1;

            if moved {
                counts.increment(category);
                files_moved += 1;
            }
            sink.emit(OrganizeEvent::Progress(ProgressEvent { processed, total }));
            if moved {
                sink.emit(OrganizeEvent::Counts(CategoryCountsEvent {
                    counts: counts.clone(),
                }));
            }
        }

        let mut folders_moved = 0;
        for folder in &snapshot.subdirectories {
            if cancel.is_cancelled() {
                info!(processed, total, "run cancelled");
                return Err(OrganizeError::Cancelled { processed, total });
            }

            let folders_dir = Self::ensure_category_dir(directory, Category::Folders)?;
            if self.relocate(folder, &folders_dir, sink, &mut skipped)? {
                counts.increment(Category::Folders);
                folders_moved += 1;
                sink.emit(OrganizeEvent::Counts(CategoryCountsEvent {
                    counts: counts.clone(),
                }));
            }
        }

        info!(
            files_moved,
            folders_moved,
            skipped = skipped.len(),
            "organize run finished"
        );

        Ok(RunSummary {
            directory: directory.to_path_buf(),
            started_at,
            finished_at: Utc::now(),
            files_total: total,
            files_moved,
            folders_moved,
            skipped,
            counts,
        })
    }

    /// Moves `entry` into `target_dir`, applying the conflict policy.
    ///
    /// Returns `Ok(false)` when the entry was skipped.
    fn relocate<S: EventSink + ?Sized>(
        &self,
        entry: &Path,
        target_dir: &Path,
        sink: &mut S,
        skipped: &mut Vec<SkippedEntry>,
    ) -> OrganizeResult<bool> {
        match Self::move_into(entry, target_dir)? {
            MoveOutcome::Moved(destination) => {
                debug!(
                    from = %entry.display(),
                    to = %destination.display(),
                    "moved entry"
                );
                Ok(true)
            }
            MoveOutcome::Conflict(destination) => match self.on_conflict {
                ConflictPolicy::Abort => Err(OrganizeError::MoveConflict {
                    entry: entry.to_path_buf(),
                    destination,
                }),
                ConflictPolicy::Skip => {
                    warn!(
                        entry = %entry.display(),
                        destination = %destination.display(),
                        "destination exists, leaving entry in place"
                    );
                    let record = SkippedEntry {
                        name: entry_name(entry),
                        destination,
                    };
                    sink.emit(OrganizeEvent::Skipped(record.clone()));
                    skipped.push(record);
                    Ok(false)
                }
            },
        }
    }

    /// Returns the folder for `category` under `root`, creating it if needed.
    fn ensure_category_dir(root: &Path, category: Category) -> OrganizeResult<PathBuf> {
        let category_path = root.join(category.dir_name());
        match fs::create_dir(&category_path) {
            Ok(()) => {
                debug!(path = %category_path.display(), "created category directory");
                Ok(category_path)
            }
            // Already there from an earlier entry, an earlier run, or another process.
            Err(e) if e.kind() == ErrorKind::AlreadyExists && category_path.is_dir() => {
                Ok(category_path)
            }
            Err(source) => Err(OrganizeError::DirectoryCreationFailed {
                path: category_path,
                source,
            }),
        }
    }

    /// Renames `entry` into `target_dir`, keeping its name. Nothing is moved
    /// if the destination name is already taken.
    fn move_into(entry: &Path, target_dir: &Path) -> OrganizeResult<MoveOutcome> {
        let file_name = entry
            .file_name()
            .ok_or_else(|| OrganizeError::MoveFailure {
                entry: entry.to_path_buf(),
                destination: target_dir.to_path_buf(),
                error: std::io::Error::new(
                    ErrorKind::InvalidInput,
                    "entry has no name component",
                ),
            })?;

        let destination = target_dir.join(file_name);
        if destination.symlink_metadata().is_ok() {
            return Ok(MoveOutcome::Conflict(destination));
        }

        fs::rename(entry, &destination).map_err(|error| OrganizeError::MoveFailure {
            entry: entry.to_path_buf(),
            destination: destination.clone(),
            error,
        })?;

        Ok(MoveOutcome::Moved(destination))
    }
}

/// Organizes `directory` with default settings and no cancellation.
pub fn organize<S: EventSink + ?Sized>(
    directory: &Path,
    sink: &mut S,
) -> OrganizeResult<RunSummary> {
    FileOrganizer::new().organize(directory, sink, &CancellationToken::new())
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExcludeRules, FilterRules};
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), name).expect("Failed to write test file");
    }

    fn progress_events(events: &[OrganizeEvent]) -> Vec<ProgressEvent> {
        events
            .iter()
            .filter_map(|e| match e {
                OrganizeEvent::Progress(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    fn counts_events(events: &[OrganizeEvent]) -> Vec<CategoryCounts> {
        events
            .iter()
            .filter_map(|e| match e {
                OrganizeEvent::Counts(c) => Some(c.counts.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_mixed_directory_scenario() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        touch(base_path, "a.pdf");
        touch(base_path, "b.PNG");
        touch(base_path, "c");
        fs::create_dir(base_path.join("old_photos")).unwrap();

        let mut events: Vec<OrganizeEvent> = Vec::new();
        let summary = organize(base_path, &mut events).expect("organize failed");

        assert!(base_path.join("Documents/a.pdf").is_file());
        assert!(base_path.join("Images/b.PNG").is_file());
        assert!(base_path.join("Misc/c").is_file());
        assert!(base_path.join("Folders/old_photos").is_dir());
        assert!(!base_path.join("a.pdf").exists());

        let counts = &summary.counts;
        assert_eq!(counts.get(Category::Documents), 1);
        assert_eq!(counts.get(Category::Images), 1);
        assert_eq!(counts.get(Category::Misc), 1);
        assert_eq!(counts.get(Category::Folders), 1);
        assert_eq!(counts.get(Category::Audio), 0);
        assert_eq!(counts.total(), 4);
        assert_eq!(summary.files_total, 3);
        assert_eq!(summary.files_moved, 3);
        assert_eq!(summary.folders_moved, 1);
    }

    #[test]
    fn test_progress_stream_shape() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        for name in ["one.mp3", "two.mp4", "three.zip", "four.exe"] {
            touch(base_path, name);
        }
        fs::create_dir(base_path.join("projects")).unwrap();

        let mut events: Vec<OrganizeEvent> = Vec::new();
        organize(base_path, &mut events).expect("organize failed");

        let progress = progress_events(&events);
        assert_eq!(progress.len(), 4);
        assert!(progress.iter().all(|p| p.total == 4));
        assert!(progress.windows(2).all(|w| w[0].processed <= w[1].processed));
        assert_eq!(progress.last().map(|p| p.processed), Some(4));

        // One counts snapshot per moved entry, folder included.
        let counts = counts_events(&events);
        assert_eq!(counts.len(), 5);
        for pair in counts.windows(2) {
            for category in Category::ALL {
                assert!(pair[0].get(category) <= pair[1].get(category));
            }
        }
        assert_eq!(counts.last().map(|c| c.get(Category::Folders)), Some(1));

        // Each file produces Progress immediately followed by Counts.
        assert!(matches!(events[0], OrganizeEvent::Progress(_)));
        assert!(matches!(events[1], OrganizeEvent::Counts(_)));
    }

    #[test]
    fn test_empty_directory_emits_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut events: Vec<OrganizeEvent> = Vec::new();
        let summary = organize(temp_dir.path(), &mut events).expect("organize failed");

        assert!(events.is_empty());
        assert_eq!(summary.files_total, 0);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_only_folders_emits_counts_but_no_progress() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(temp_dir.path().join("alpha")).unwrap();

        let mut events: Vec<OrganizeEvent> = Vec::new();
        organize(temp_dir.path(), &mut events).expect("organize failed");

        assert!(progress_events(&events).is_empty());
        assert_eq!(counts_events(&events).len(), 1);
        assert!(temp_dir.path().join("Folders/alpha").is_dir());
    }

    #[test]
    fn test_uses_existing_category_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::create_dir(base_path.join("Images")).unwrap();
        touch(&base_path.join("Images"), "older.jpg");
        touch(base_path, "newer.jpg");

        let mut events: Vec<OrganizeEvent> = Vec::new();
        let summary = organize(base_path, &mut events).expect("organize failed");

        assert!(base_path.join("Images/older.jpg").is_file());
        assert!(base_path.join("Images/newer.jpg").is_file());
        // The pre-existing Images folder is a destination, not a subdirectory to sweep.
        assert_eq!(summary.folders_moved, 0);
        assert!(!base_path.join("Folders").exists());
    }

    #[test]
    fn test_second_run_does_not_nest() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        touch(base_path, "a.txt");
        fs::create_dir(base_path.join("stuff")).unwrap();

        organize(base_path, &mut Vec::<OrganizeEvent>::new()).expect("first run failed");
        let mut events: Vec<OrganizeEvent> = Vec::new();
        let summary = organize(base_path, &mut events).expect("second run failed");

        assert!(events.is_empty());
        assert_eq!(summary.counts.total(), 0);
        assert!(base_path.join("Documents/a.txt").is_file());
        assert!(base_path.join("Folders/stuff").is_dir());
        assert!(!base_path.join("Folders/Folders").exists());
        assert!(!base_path.join("Folders/Documents").exists());
    }

    #[test]
    fn test_conflict_aborts_by_default() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::create_dir(base_path.join("Documents")).unwrap();
        fs::write(base_path.join("Documents/report.pdf"), "old").unwrap();
        fs::write(base_path.join("report.pdf"), "new").unwrap();

        let result = organize(base_path, &mut Vec::<OrganizeEvent>::new());

        assert!(matches!(result, Err(OrganizeError::MoveConflict { .. })));
        assert_eq!(
            fs::read_to_string(base_path.join("Documents/report.pdf")).unwrap(),
            "old"
        );
        assert_eq!(
            fs::read_to_string(base_path.join("report.pdf")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_conflict_skip_keeps_both_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::create_dir(base_path.join("Documents")).unwrap();
        fs::write(base_path.join("Documents/report.pdf"), "old").unwrap();
        fs::write(base_path.join("report.pdf"), "new").unwrap();
        touch(base_path, "song.mp3");

        let organizer = FileOrganizer::new().with_conflict_policy(ConflictPolicy::Skip);
        let mut events: Vec<OrganizeEvent> = Vec::new();
        let summary = organizer
            .organize(base_path, &mut events, &CancellationToken::new())
            .expect("organize failed");

        assert!(base_path.join("report.pdf").is_file());
        assert!(base_path.join("Audio/song.mp3").is_file());
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].name, "report.pdf");
        assert_eq!(summary.files_moved, 1);
        assert_eq!(summary.counts.get(Category::Documents), 0);

        let progress = progress_events(&events);
        assert_eq!(progress.last().map(|p| (p.processed, p.total)), Some((2, 2)));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, OrganizeEvent::Skipped(s) if s.name == "report.pdf"))
        );
    }

    #[test]
    fn test_cancelled_before_start_moves_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        touch(base_path, "a.pdf");

        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut events: Vec<OrganizeEvent> = Vec::new();
        let result = FileOrganizer::new().organize(base_path, &mut events, &cancel);

        assert!(matches!(
            result,
            Err(OrganizeError::Cancelled {
                processed: 0,
                total: 1
            })
        ));
        assert!(events.is_empty());
        assert!(base_path.join("a.pdf").is_file());
        assert!(!base_path.join("Documents").exists());
    }

    /// Removes a file behind the organizer's back after the first file event.
    struct RemoveAfterFirstFile {
        victim: PathBuf,
        events: Vec<OrganizeEvent>,
    }

    impl EventSink for RemoveAfterFirstFile {
        fn emit(&mut self, event: OrganizeEvent) {
            if matches!(event, OrganizeEvent::Progress(_)) && self.victim.exists() {
                fs::remove_file(&self.victim).expect("Failed to remove file");
            }
            self.events.push(event);
        }
    }

    #[test]
    fn test_vanished_file_fails_run_and_keeps_earlier_moves() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        touch(base_path, "a.txt");
        touch(base_path, "b.txt");

        let mut sink = RemoveAfterFirstFile {
            victim: base_path.join("b.txt"),
            events: Vec::new(),
        };
        let result = FileOrganizer::new().organize(base_path, &mut sink, &CancellationToken::new());

        match result {
            Err(OrganizeError::MoveFailure {
                entry,
                destination,
                error,
            }) => {
                assert_eq!(entry, base_path.join("b.txt"));
                assert_eq!(destination, base_path.join("Documents/b.txt"));
                assert_eq!(error.kind(), ErrorKind::NotFound);
            }
            other => panic!("expected MoveFailure, got {other:?}"),
        }
        assert!(base_path.join("Documents/a.txt").is_file());
        assert_eq!(progress_events(&sink.events).len(), 1);
    }

    #[test]
    fn test_existing_category_dir_is_reused() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let created = FileOrganizer::ensure_category_dir(base_path, Category::Images).unwrap();
        touch(&created, "keep.png");
        let again = FileOrganizer::ensure_category_dir(base_path, Category::Images).unwrap();

        assert_eq!(created, again);
        assert!(again.join("keep.png").is_file());
    }

    #[test]
    fn test_invalid_base_path() {
        let result = organize(Path::new("/non/existent/path"), &mut Vec::<OrganizeEvent>::new());
        assert!(matches!(result, Err(OrganizeError::DirectoryAccess { .. })));
    }

    #[test]
    fn test_file_as_base_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        touch(temp_dir.path(), "plain.txt");

        let result = organize(&temp_dir.path().join("plain.txt"), &mut Vec::<OrganizeEvent>::new());
        assert!(matches!(result, Err(OrganizeError::DirectoryAccess { .. })));
    }

    #[test]
    fn test_snapshot_skips_destination_names_and_filtered_entries() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        for dir in ["Misc", "Folders", "Documents", "music"] {
            fs::create_dir(base_path.join(dir)).unwrap();
        }
        touch(base_path, "b.txt");
        touch(base_path, "a.txt");
        touch(base_path, "download.part");

        let filter = EntryFilter::compile(&FilterRules {
            include_hidden: true,
            exclude: ExcludeRules {
                patterns: vec!["*.part".to_string()],
                ..Default::default()
            },
        })
        .unwrap();
        let snapshot = DirectorySnapshot::scan(base_path, &filter).unwrap();

        let names: Vec<_> = snapshot.files.iter().map(|p| entry_name(p)).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        let dirs: Vec<_> = snapshot
            .subdirectories
            .iter()
            .map(|p| entry_name(p))
            .collect();
        assert_eq!(dirs, vec!["music"]);
    }

    #[test]
    fn test_file_named_like_category_blocks_that_destination() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        // "Misc" has no extension, so it belongs in a folder it occupies itself.
        touch(base_path, "Misc");

        let result = organize(base_path, &mut Vec::<OrganizeEvent>::new());
        assert!(matches!(
            result,
            Err(OrganizeError::DirectoryCreationFailed { .. })
        ));
        assert!(base_path.join("Misc").is_file());
    }
}
