//! End-to-end scenarios across the whole stack:
//! auth → session manager → app state → editor → autosave → store,
//! with the in-process shims standing in for the remote collaborators.

use std::sync::Arc;
use std::time::Duration;

use vitrine_app::SessionManager;
use vitrine_core::DraftRecord;
use vitrine_editor::{snapshot_preview, MemoryPreviewChannel, PreviewChannel, PreviewTarget};
use vitrine_store::{AuthClient, MemoryAuth, MemoryStore};
use vitrine_sync::SyncStatus;

const WINDOW: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn sign_up_and_start(
    auth: &MemoryAuth,
    manager: &mut SessionManager,
    email: &str,
) -> anyhow::Result<()> {
    auth.sign_up(email, "pw", "Ada").await?;
    let session = auth.session().await;
    manager.handle_session_change(session).await;
    Ok(())
}

async fn settle() {
    tokio::time::sleep(WINDOW * 3).await;
}

// ---------------------------------------------------------------------------
// Scenario A: fresh user, no stored row
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn fresh_login_shows_empty_dashboard_with_saved_status() -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());
    let auth = MemoryAuth::new();
    let mut manager = SessionManager::new(store.clone(), WINDOW);

    sign_up_and_start(&auth, &mut manager, "ada@example.com").await?;

    let state = manager.state().expect("signed in");
    assert!(state.row().pwas.is_empty());
    assert!(state.row().invoices.is_empty());
    assert_eq!(state.balance_label(), "$0.00");
    assert_eq!(state.sync_status(), SyncStatus::Saved);
    Ok(())
}

// ---------------------------------------------------------------------------
// Scenario B: rapid edits collapse into one save
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn rapid_edits_produce_exactly_one_save_with_final_state() -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());
    let auth = MemoryAuth::new();
    let mut manager = SessionManager::new(store.clone(), WINDOW);
    sign_up_and_start(&auth, &mut manager, "ada@example.com").await?;

    let state = manager.state().expect("signed in");
    let user_id = state.session().user_id.clone();
    let id = state.create_record("New Application").id.clone();
    let mut editor = state.open_editor(&id)?;
    editor.set_domain(Some("example.com".to_string()));
    editor.set_description("Hello");
    drop(editor);
    settle().await;

    assert_eq!(store.upsert_calls(), 1);
    let saved = store.get(&user_id).await.expect("row saved");
    assert_eq!(saved.pwas.len(), 1);
    assert_eq!(saved.pwas[0].name, "New Application");
    assert_eq!(saved.pwas[0].domain.as_deref(), Some("example.com"));
    assert_eq!(saved.pwas[0].description, "Hello");
    Ok(())
}

// ---------------------------------------------------------------------------
// Scenario C: adding a comment
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn confirmed_comment_lands_in_the_record_with_fresh_id() -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());
    let auth = MemoryAuth::new();
    let mut manager = SessionManager::new(store.clone(), WINDOW);
    sign_up_and_start(&auth, &mut manager, "ada@example.com").await?;

    let state = manager.state().expect("signed in");
    let user_id = state.session().user_id.clone();
    let id = state.create_record("New Application").id.clone();
    let mut editor = state.open_editor(&id)?;
    let before = editor.record().comments.len();

    editor.begin_comment();
    editor.edit_pending(|c| {
        c.body = "Great app".to_string();
        c.rating = 5;
    });
    editor.confirm_comment();

    let comments = &editor.record().comments;
    assert_eq!(comments.len(), before + 1);
    assert!(!comments[0].id.is_empty());
    assert_eq!(comments[0].body, "Great app");
    assert_eq!(comments[0].rating, 5);
    assert_eq!(comments[0].likes, 0);
    drop(editor);

    settle().await;
    let saved = store.get(&user_id).await.expect("row saved");
    assert_eq!(saved.pwas[0].comments.len(), before + 1);
    Ok(())
}

// ---------------------------------------------------------------------------
// Scenarios D & E: preview hand-off
// ---------------------------------------------------------------------------

#[tokio::test]
async fn preview_without_domain_uses_the_in_app_route() {
    let channel = MemoryPreviewChannel::new();
    let record = DraftRecord::create();

    let target = snapshot_preview(&record, &channel);

    assert_eq!(
        target,
        PreviewTarget::InApp(vitrine_core::Route::Preview)
    );
    let snapshot: DraftRecord = serde_json::from_str(&channel.get().unwrap()).unwrap();
    assert_eq!(snapshot.id, record.id);
}

#[tokio::test]
async fn preview_with_domain_opens_a_new_context_at_the_domain() {
    let channel = MemoryPreviewChannel::new();
    let mut record = DraftRecord::create();
    record.domain = Some("example.com".to_string());

    let target = snapshot_preview(&record, &channel);

    assert_eq!(
        target,
        PreviewTarget::External("https://example.com/#preview".to_string())
    );
    let snapshot: DraftRecord = serde_json::from_str(&channel.get().unwrap()).unwrap();
    assert_eq!(snapshot.domain.as_deref(), Some("example.com"));
}
