//! Top-up invoices.
//!
//! Invoices form an append-only list on the user's row: created by the
//! top-up flow, transitioned `new` → `paid` exactly once, never deleted.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Invoice payment status. The only transition is `New` → `Paid`; no code
/// path flips it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum InvoiceStatus {
    New,
    Paid,
}

/// A balance top-up invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    pub id: String,
    /// Positive decimal amount in account currency.
    pub amount: f64,
    pub created_at: String,
    pub status: InvoiceStatus,
    pub paid_at: Option<String>,
    pub tx_hash: Option<String>,
}

impl Invoice {
    /// Create a fresh unpaid invoice.
    pub fn new(amount: f64) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            amount,
            created_at: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            status: InvoiceStatus::New,
            paid_at: None,
            tx_hash: None,
        }
    }

    /// Transition this invoice to `Paid`.
    ///
    /// One-way: paying an already-paid invoice is a conflict.
    pub fn mark_paid(
        &mut self,
        paid_at: impl Into<String>,
        tx_hash: Option<String>,
    ) -> Result<(), CoreError> {
        if self.status == InvoiceStatus::Paid {
            return Err(CoreError::Conflict(format!(
                "Invoice {} is already paid",
                self.id
            )));
        }
        self.status = InvoiceStatus::Paid;
        self.paid_at = Some(paid_at.into());
        self.tx_hash = tx_hash;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_invoice_is_unpaid() {
        let inv = Invoice::new(25.0);
        assert_eq!(inv.status, InvoiceStatus::New);
        assert!(inv.paid_at.is_none());
        assert!(inv.tx_hash.is_none());
        assert!(!inv.created_at.is_empty());
    }

    #[test]
    fn mark_paid_sets_status_and_details() {
        let mut inv = Invoice::new(25.0);
        inv.mark_paid("2025-01-15", Some("0xabc".to_string())).unwrap();
        assert_eq!(inv.status, InvoiceStatus::Paid);
        assert_eq!(inv.paid_at.as_deref(), Some("2025-01-15"));
        assert_eq!(inv.tx_hash.as_deref(), Some("0xabc"));
    }

    #[test]
    fn mark_paid_twice_is_a_conflict() {
        let mut inv = Invoice::new(10.0);
        inv.mark_paid("2025-01-15", None).unwrap();
        let err = inv.mark_paid("2025-01-16", None).unwrap_err();
        assert!(err.to_string().contains("already paid"));
        // First payment details are untouched.
        assert_eq!(inv.paid_at.as_deref(), Some("2025-01-15"));
    }
}
