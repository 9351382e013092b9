//! External collaborators of the builder core.
//!
//! The editor and autosave controller only ever talk to the row store and
//! the auth service through the traits defined here. `MemoryStore` and
//! `MemoryAuth` are the in-process shims used by tests and local runs;
//! `RestStore` is the production client.

pub mod auth;
pub mod domains;
pub mod error;
pub mod memory;
pub mod rest;
pub mod row;

use async_trait::async_trait;

pub use auth::{AuthClient, AuthError, MemoryAuth, Session};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use rest::RestStore;
pub use row::UserRow;

/// The remote row store: one row per user, conflict key = `user_id`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the stored row for a user.
    ///
    /// A missing row reports [`StoreError::NotFound`]; callers treat that
    /// as a normal empty state, not a failure.
    async fn load(&self, user_id: &str) -> Result<UserRow, StoreError>;

    /// Write the full row, keyed by `row.user_id`.
    ///
    /// Idempotent: repeated calls with the same user id overwrite rather
    /// than duplicate.
    async fn upsert(&self, row: &UserRow) -> Result<(), StoreError>;
}
