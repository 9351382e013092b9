//! Per-session application state: the user's row plus the dashboard and
//! invoice operations. Every mutation marks the row dirty on the autosave
//! handle, exactly like the editor does for record fields.

use vitrine_core::{CoreError, DraftRecord, Invoice};
use vitrine_editor::DraftEditor;
use vitrine_store::{Session, UserRow};
use vitrine_sync::{AutosaveHandle, SyncStatus};

/// The in-memory state for one authenticated session.
pub struct AppState {
    session: Session,
    row: UserRow,
    autosave: AutosaveHandle,
}

impl AppState {
    pub fn new(session: Session, row: UserRow, autosave: AutosaveHandle) -> Self {
        Self {
            session,
            row,
            autosave,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn row(&self) -> &UserRow {
        &self.row
    }

    /// Current sync status for the status pill.
    pub fn sync_status(&self) -> SyncStatus {
        *self.autosave.status().borrow()
    }

    fn mark_dirty(&self) {
        self.autosave.mark_dirty(self.row.clone());
    }

    // -----------------------------------------------------------------------
    // Dashboard
    // -----------------------------------------------------------------------

    /// Create a new record with defaults and the given display name.
    pub fn create_record(&mut self, name: impl Into<String>) -> &DraftRecord {
        let mut record = DraftRecord::create();
        record.name = name.into();
        self.row.pwas.push(record);
        self.mark_dirty();
        self.row.pwas.last().expect("record just pushed")
    }

    /// Remove a record from the list entirely (not a soft delete).
    ///
    /// Returns `false` for an unknown id.
    pub fn delete_record(&mut self, id: &str) -> bool {
        let before = self.row.pwas.len();
        self.row.pwas.retain(|r| r.id != id);
        let removed = self.row.pwas.len() != before;
        if removed {
            self.mark_dirty();
        }
        removed
    }

    /// Open a [`DraftEditor`] for the record with this id.
    ///
    /// The editor borrows the row exclusively for as long as it lives, so no
    /// other state mutation can run against the row mid-session; dropping
    /// the editor ends the session.
    pub fn open_editor(&mut self, record_id: &str) -> Result<DraftEditor<'_>, CoreError> {
        DraftEditor::open(&mut self.row, record_id, self.autosave.clone())
    }

    /// Balance formatted for the dashboard header.
    pub fn balance_label(&self) -> String {
        format!("${:.2}", self.row.balance)
    }

    // -----------------------------------------------------------------------
    // Invoices
    // -----------------------------------------------------------------------

    /// Append a fresh unpaid invoice (the list is append-only).
    pub fn top_up(&mut self, amount: f64) -> &Invoice {
        self.row.invoices.push(Invoice::new(amount));
        self.mark_dirty();
        self.row.invoices.last().expect("invoice just pushed")
    }

    /// Mark an invoice paid and credit its amount to the balance.
    pub fn confirm_invoice(
        &mut self,
        id: &str,
        paid_at: impl Into<String>,
        tx_hash: Option<String>,
    ) -> Result<(), CoreError> {
        let invoice = self
            .row
            .invoices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "invoice",
                id: id.to_string(),
            })?;
        invoice.mark_paid(paid_at, tx_hash)?;
        self.row.balance += invoice.amount;
        self.mark_dirty();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
