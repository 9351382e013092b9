//! In-process row store used by tests and local runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::row::UserRow;
use crate::RecordStore;

/// A [`RecordStore`] backed by a `HashMap`, with fault injection for the
/// error-status paths.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<HashMap<String, UserRow>>,
    fail_next_upsert: AtomicBool,
    fail_next_load: AtomicBool,
    upsert_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `upsert` fail with a backend error.
    pub fn fail_next_upsert(&self) {
        self.fail_next_upsert.store(true, Ordering::SeqCst);
    }

    /// Make the next `load` fail with a backend error (not `NotFound`).
    pub fn fail_next_load(&self) {
        self.fail_next_load.store(true, Ordering::SeqCst);
    }

    /// Number of `upsert` calls that reached the store (including the
    /// injected failure).
    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }

    /// Snapshot of the stored row for a user, if any.
    pub async fn get(&self, user_id: &str) -> Option<UserRow> {
        self.rows.read().await.get(user_id).cloned()
    }

    /// Number of rows currently stored.
    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Seed a row directly, bypassing the trait.
    pub async fn put(&self, row: UserRow) {
        self.rows.write().await.insert(row.user_id.clone(), row);
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn load(&self, user_id: &str) -> Result<UserRow, StoreError> {
        if self.fail_next_load.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Backend("injected failure".to_string()));
        }
        self.rows
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn upsert(&self, row: &UserRow) -> Result<(), StoreError> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_upsert.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Backend("injected failure".to_string()));
        }
        self.rows
            .write()
            .await
            .insert(row.user_id.clone(), row.clone());
        Ok(())
    }
}
