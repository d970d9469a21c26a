//! Background execution of an organize run.
//!
//! The worker runs [`FileOrganizer::organize`] on its own thread and forwards
//! every event over an unbounded channel, so a foreground loop can keep
//! rendering while files are moved. The last event on the channel is always
//! `Finished` or `Failed`, even when the run panics; [`OrganizeHandle::join`]
//! returns the run's actual result.

use crate::file_organizer::{CancellationToken, FileOrganizer, OrganizeError, OrganizeResult};
use crate::progress::{EventSink, OrganizeEvent, RunSummary};
use crossbeam_channel::{Receiver, Sender};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::thread;
use tracing::{error, info};

/// Handle to a running or completed organize run.
pub struct OrganizeHandle {
    /// Events in emission order. Disconnects once the worker exits.
    pub events: Receiver<OrganizeEvent>,
    cancel: CancellationToken,
    thread: thread::JoinHandle<OrganizeResult<RunSummary>>,
}

impl OrganizeHandle {
    /// Ask the run to stop before its next entry.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// A clone of the run's token, for cancelling from elsewhere.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Waits for the worker and returns the run's result.
    pub fn join(self) -> OrganizeResult<RunSummary> {
        self.thread
            .join()
            .unwrap_or(Err(OrganizeError::WorkerPanicked))
    }
}

/// Starts organizing `directory` on a background thread.
///
/// # Errors
///
/// Returns `OrganizeError::WorkerSpawn` if the thread cannot be created.
pub fn start(organizer: FileOrganizer, directory: PathBuf) -> OrganizeResult<OrganizeHandle> {
    start_with_token(organizer, directory, CancellationToken::new())
}

/// Like [`start`], but observes a caller-supplied cancellation token.
pub fn start_with_token(
    organizer: FileOrganizer,
    directory: PathBuf,
    cancel: CancellationToken,
) -> OrganizeResult<OrganizeHandle> {
    spawn_run(cancel, move |events_tx, cancel| {
        info!("worker started for {}", directory.display());
        organizer.organize(&directory, events_tx, cancel)
    })
}

/// Spawns the worker thread around `run` and guarantees a terminal event,
/// including when `run` panics.
fn spawn_run<F>(cancel: CancellationToken, run: F) -> OrganizeResult<OrganizeHandle>
where
    F: FnOnce(&mut Sender<OrganizeEvent>, &CancellationToken) -> OrganizeResult<RunSummary>
        + Send
        + 'static,
{
    let (mut events_tx, events_rx) = crossbeam_channel::unbounded::<OrganizeEvent>();
    let worker_cancel = cancel.clone();

    let thread = thread::Builder::new()
        .name("foldersort-worker".into())
        .spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                run(&mut events_tx, &worker_cancel)
            }));
            match outcome {
                Ok(Ok(summary)) => {
                    events_tx.emit(OrganizeEvent::Finished(summary.clone()));
                    Ok(summary)
                }
                Ok(Err(e)) => {
                    error!("organize run failed: {e}");
                    events_tx.emit(OrganizeEvent::Failed {
                        message: e.to_string(),
                    });
                    Err(e)
                }
                Err(payload) => {
                    error!("organize run panicked");
                    events_tx.emit(OrganizeEvent::Failed {
                        message: OrganizeError::WorkerPanicked.to_string(),
                    });
                    panic::resume_unwind(payload)
                }
            }
        })
        .map_err(OrganizeError::WorkerSpawn)?;

    Ok(OrganizeHandle {
        events: events_rx,
        cancel,
        thread,
    })
}
