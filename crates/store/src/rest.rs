//! HTTP client for the hosted row store.
//!
//! Speaks a minimal row API: `GET {base}/rows/{user_id}` and
//! `PUT {base}/rows/{user_id}`. Rows read back from the store carry
//! [`PartialDraftRecord`]s; they are merged through `merge_defaults` here so
//! the rest of the workspace only ever sees complete records.

use serde::{Deserialize, Serialize};
use vitrine_core::{merge_defaults, Invoice, PartialDraftRecord};

use async_trait::async_trait;

use crate::error::StoreError;
use crate::row::UserRow;
use crate::RecordStore;

/// Wire form of [`UserRow`]: records are partial so rows written by any
/// prior build deserialize cleanly.
#[derive(Debug, Serialize, Deserialize)]
struct WireUserRow {
    user_id: String,
    email: String,
    full_name: String,
    #[serde(default)]
    balance: f64,
    #[serde(default)]
    pwas: Vec<PartialDraftRecord>,
    #[serde(default)]
    invoices: Vec<Invoice>,
}

/// Merge a wire row into the in-memory form.
fn merge_wire_row(wire: WireUserRow) -> UserRow {
    UserRow {
        user_id: wire.user_id,
        email: wire.email,
        full_name: wire.full_name,
        balance: wire.balance,
        pwas: wire.pwas.into_iter().map(merge_defaults).collect(),
        invoices: wire.invoices,
    }
}

/// [`RecordStore`] implementation against the hosted row API.
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestStore {
    /// Create a client against `base_url` (no trailing slash).
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn row_url(&self, user_id: &str) -> String {
        format!("{}/rows/{user_id}", self.base_url)
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn load(&self, user_id: &str) -> Result<UserRow, StoreError> {
        let response = self
            .client
            .get(self.row_url(user_id))
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound);
        }
        if !response.status().is_success() {
            return Err(StoreError::Backend(format!(
                "load failed with status {}",
                response.status()
            )));
        }

        let wire: WireUserRow = response
            .json()
            .await
            .map_err(|e| StoreError::Backend(format!("malformed row payload: {e}")))?;
        Ok(merge_wire_row(wire))
    }

    async fn upsert(&self, row: &UserRow) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.row_url(&row.user_id))
            .json(row)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Backend(format!(
                "upsert failed with status {}",
                response.status()
            )));
        }

        tracing::debug!(user_id = %row.user_id, "Row upserted");
        Ok(())
    }
}
