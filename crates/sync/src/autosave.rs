//! The autosave controller task.
//!
//! A single long-lived Tokio task owns the debounce state: the latest
//! snapshot of the watched row and at most one pending deadline. Each
//! `mark_dirty` replaces the pending deadline rather than queuing another
//! save, which is the central behavioral contract — N mutations inside the
//! window produce exactly one upsert, carrying the state as of the last
//! mutation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use vitrine_store::{RecordStore, Session, StoreError, UserRow};

use crate::status::SyncStatus;

/// Default debounce window before a mutation is persisted.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

enum Command {
    /// The watched state changed; restart the window with this snapshot.
    MarkDirty(Box<UserRow>),
    /// Persist the latest snapshot now, bypassing the window.
    Flush,
}

/// Cheaply cloneable handle to a running [`Autosave`] task.
#[derive(Clone, Debug)]
pub struct AutosaveHandle {
    cmd_tx: mpsc::UnboundedSender<Command>,
    status_rx: watch::Receiver<SyncStatus>,
}

impl AutosaveHandle {
    /// Report a mutation of the watched state.
    ///
    /// Restarts the debounce window; a previously pending save for an older
    /// snapshot is cancelled, never queued.
    pub fn mark_dirty(&self, row: UserRow) {
        // A send error only means the task is shutting down; the pending
        // state is being discarded anyway.
        let _ = self.cmd_tx.send(Command::MarkDirty(Box::new(row)));
    }

    /// Request an immediate save of the latest snapshot (explicit save
    /// action, tab advance). No-op if nothing was ever marked dirty.
    pub fn flush(&self) {
        let _ = self.cmd_tx.send(Command::Flush);
    }

    /// Observe the tri-state sync status.
    pub fn status(&self) -> watch::Receiver<SyncStatus> {
        self.status_rx.clone()
    }
}

/// Debounced autosave controller.
pub struct Autosave;

impl Autosave {
    /// Spawn the controller task.
    ///
    /// The task runs until `cancel` is triggered or every handle is
    /// dropped; both discard any pending save without issuing it, so a
    /// teardown or user switch never emits a stray write.
    pub fn spawn(
        store: Arc<dyn RecordStore>,
        window: Duration,
        cancel: CancellationToken,
    ) -> AutosaveHandle {
        Self::spawn_with_status(store, window, cancel, SyncStatus::Saved)
    }

    /// [`spawn`](Self::spawn) with an explicit initial status, so a failed
    /// session load can seed the pill with `Error`.
    pub fn spawn_with_status(
        store: Arc<dyn RecordStore>,
        window: Duration,
        cancel: CancellationToken,
        initial: SyncStatus,
    ) -> AutosaveHandle {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(initial);

        tokio::spawn(run(store, window, cancel, cmd_rx, status_tx));

        AutosaveHandle { cmd_tx, status_rx }
    }
}

async fn run(
    store: Arc<dyn RecordStore>,
    window: Duration,
    cancel: CancellationToken,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    status_tx: watch::Sender<SyncStatus>,
) {
    tracing::debug!(window_ms = window.as_millis() as u64, "Autosave started");

    // Latest snapshot seen, kept across saves so an explicit flush can
    // re-persist it. `deadline` is the single pending debounce timer.
    let mut latest: Option<UserRow> = None;
    let mut deadline: Option<Instant> = None;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                if deadline.is_some() {
                    tracing::debug!("Autosave stopping; pending save discarded");
                }
                break;
            }

            cmd = cmd_rx.recv() => match cmd {
                None => {
                    // Every handle dropped: the owner tore down its state,
                    // a late save would race the next session's load.
                    break;
                }
                Some(Command::MarkDirty(row)) => {
                    latest = Some(*row);
                    deadline = Some(Instant::now() + window);
                }
                Some(Command::Flush) => {
                    deadline = None;
                    if let Some(row) = latest.as_ref() {
                        save(store.as_ref(), row, &status_tx).await;
                    }
                }
            },

            _ = sleep_until_opt(deadline) => {
                deadline = None;
                if let Some(row) = latest.as_ref() {
                    save(store.as_ref(), row, &status_tx).await;
                }
            }
        }
    }
}

/// Sleep until the deadline, or forever when none is pending.
async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(d) => tokio::time::sleep_until(d).await,
        None => std::future::pending().await,
    }
}

async fn save(store: &dyn RecordStore, row: &UserRow, status_tx: &watch::Sender<SyncStatus>) {
    let _ = status_tx.send(SyncStatus::Saving);
    match store.upsert(row).await {
        Ok(()) => {
            let _ = status_tx.send(SyncStatus::Saved);
        }
        Err(e) => {
            tracing::warn!(user_id = %row.user_id, error = %e, "Autosave failed");
            // Sticky until the next save attempt succeeds; no self-retry.
            let _ = status_tx.send(SyncStatus::Error);
        }
    }
}

/// Load the stored row for a session, once per authenticated session.
///
/// A missing row is a normal empty state: the caller gets an empty row and
/// `Saved`. Any other failure yields the same safe empty row with `Error`.
pub async fn load_row(store: &dyn RecordStore, session: &Session) -> (UserRow, SyncStatus) {
    match store.load(&session.user_id).await {
        Ok(row) => (row, SyncStatus::Saved),
        Err(StoreError::NotFound) => (
            UserRow::empty(&session.user_id, &session.email, &session.full_name),
            SyncStatus::Saved,
        ),
        Err(e) => {
            tracing::warn!(user_id = %session.user_id, error = %e, "Row load failed");
            (
                UserRow::empty(&session.user_id, &session.email, &session.full_name),
                SyncStatus::Error,
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
