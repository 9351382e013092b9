//! Session lifecycle: one autosave controller and one [`AppState`] per
//! authenticated user.
//!
//! Switching users (or logging out) must cancel any pending debounce and
//! reset in-memory state before the next load completes, so one user's
//! draft is never saved under another's identity. The host drives
//! [`SessionManager::handle_session_change`] from the auth client's
//! `subscribe` channel.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use vitrine_store::{RecordStore, Session};
use vitrine_sync::{load_row, Autosave, SyncStatus};

use crate::state::AppState;

struct ActiveSession {
    cancel: CancellationToken,
    state: AppState,
}

/// Owns the per-session state and its explicit init/dispose lifecycle.
pub struct SessionManager {
    store: Arc<dyn RecordStore>,
    debounce: Duration,
    active: Option<ActiveSession>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn RecordStore>, debounce: Duration) -> Self {
        Self {
            store,
            debounce,
            active: None,
        }
    }

    /// React to an auth state change.
    ///
    /// Any current session is disposed first: its cancellation token fires,
    /// which discards a pending debounced save, and its state is dropped.
    /// For a login the new user's row is then loaded (a missing row is a
    /// normal empty state) and a fresh autosave controller spawned, seeded
    /// with the load status.
    pub async fn handle_session_change(&mut self, session: Option<Session>) {
        self.dispose();

        let Some(session) = session else {
            tracing::debug!("Signed out; session state cleared");
            return;
        };

        let (row, status) = load_row(self.store.as_ref(), &session).await;
        if status == SyncStatus::Error {
            tracing::warn!(user_id = %session.user_id, "Session started with a failed row load");
        }

        let cancel = CancellationToken::new();
        let handle = Autosave::spawn_with_status(
            Arc::clone(&self.store),
            self.debounce,
            cancel.clone(),
            status,
        );

        tracing::debug!(user_id = %session.user_id, "Session started");
        self.active = Some(ActiveSession {
            cancel,
            state: AppState::new(session, row, handle),
        });
    }

    /// Cancel the current session's pending work and drop its state.
    pub fn dispose(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel.cancel();
        }
    }

    /// State of the active session, if someone is signed in.
    pub fn state(&mut self) -> Option<&mut AppState> {
        self.active.as_mut().map(|a| &mut a.state)
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.dispose();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_store::{MemoryStore, UserRow};

    const WINDOW: Duration = Duration::from_millis(100);

    fn session(user_id: &str) -> Session {
        Session {
            user_id: user_id.to_string(),
            email: format!("{user_id}@example.com"),
            full_name: "Ada".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn login_with_no_stored_row_starts_empty_and_saved() {
        let store = Arc::new(MemoryStore::new());
        let mut manager = SessionManager::new(store.clone(), WINDOW);

        manager.handle_session_change(Some(session("u1"))).await;

        let state = manager.state().unwrap();
        assert_eq!(state.sync_status(), SyncStatus::Saved);
        assert!(state.row().pwas.is_empty());
        assert_eq!(state.balance_label(), "$0.00");
    }

    #[tokio::test(start_paused = true)]
    async fn logout_discards_pending_save() {
        let store = Arc::new(MemoryStore::new());
        let mut manager = SessionManager::new(store.clone(), WINDOW);

        manager.handle_session_change(Some(session("u1"))).await;
        manager.state().unwrap().create_record("New Application");

        // Logout before the debounce window elapses.
        manager.handle_session_change(None).await;
        tokio::time::sleep(WINDOW * 3).await;

        assert_eq!(store.upsert_calls(), 0);
        assert!(manager.state().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn switching_users_never_saves_the_old_draft_under_the_new_identity() {
        let store = Arc::new(MemoryStore::new());
        let mut manager = SessionManager::new(store.clone(), WINDOW);

        manager.handle_session_change(Some(session("u1"))).await;
        manager.state().unwrap().create_record("Secret Draft");

        // Switch to another user before u1's debounce fires.
        manager.handle_session_change(Some(session("u2"))).await;
        tokio::time::sleep(WINDOW * 3).await;

        assert!(store.get("u1").await.is_none());
        assert!(store.get("u2").await.is_none());
        assert_eq!(manager.state().unwrap().session().user_id, "u2");
    }

    #[tokio::test(start_paused = true)]
    async fn existing_row_is_loaded_on_login() {
        let store = Arc::new(MemoryStore::new());
        let mut row = UserRow::empty("u1", "u1@example.com", "Ada");
        row.balance = 75.0;
        store.put(row).await;

        let mut manager = SessionManager::new(store.clone(), WINDOW);
        manager.handle_session_change(Some(session("u1"))).await;

        assert_eq!(manager.state().unwrap().balance_label(), "$75.00");
    }
}
