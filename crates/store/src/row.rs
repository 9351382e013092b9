//! The per-user row persisted by the record store.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use vitrine_core::{DraftRecord, Invoice};

/// Everything the store holds for one user, written whole on every upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserRow {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
    pub balance: f64,
    pub pwas: Vec<DraftRecord>,
    pub invoices: Vec<Invoice>,
}

impl UserRow {
    /// An empty row for a user with nothing stored yet.
    pub fn empty(
        user_id: impl Into<String>,
        email: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            full_name: full_name.into(),
            balance: 0.0,
            pwas: Vec::new(),
            invoices: Vec::new(),
        }
    }
}
