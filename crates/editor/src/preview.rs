//! Preview snapshot hand-off.
//!
//! The editor serializes the current draft into a same-origin shared slot;
//! the preview surface reads it exactly once at load. Writes are
//! synchronous and non-debounced, and a write failure (storage quota) never
//! blocks the navigation that follows.

use std::sync::Mutex;

use vitrine_core::routes::PREVIEW_FRAGMENT;
use vitrine_core::{DraftRecord, Route};

/// Fixed key of the shared preview slot. One slot, overwritten on every
/// snapshot, no expiry.
pub const PREVIEW_SLOT_KEY: &str = "vitrine.preview.draft";

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("Preview slot write failed: {0}")]
    Write(String),
}

/// The same-origin key-value slot shared between editor and preview
/// surface. Implementations bind [`PREVIEW_SLOT_KEY`] to whatever storage
/// the host provides.
pub trait PreviewChannel: Send + Sync {
    fn put(&self, payload: &str) -> Result<(), PreviewError>;

    /// Read the current snapshot. The preview surface calls this exactly
    /// once at load; `None` leaves it in its empty state (no polling).
    fn get(&self) -> Option<String>;
}

/// Where the preview action navigates after snapshotting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewTarget {
    /// Open a new browsing context at the configured domain with the
    /// preview-marker fragment.
    External(String),
    /// Activate the in-app preview route via a fragment change.
    InApp(Route),
}

/// Snapshot the draft into the preview channel and decide the navigation
/// target.
///
/// With a configured domain the target is
/// `https://{domain}/#preview`; otherwise the in-app preview route. A slot
/// write failure is logged and swallowed — it must not block navigation.
pub fn snapshot_preview(record: &DraftRecord, channel: &dyn PreviewChannel) -> PreviewTarget {
    match serde_json::to_string(record) {
        Ok(payload) => {
            if let Err(e) = channel.put(&payload) {
                tracing::warn!(record_id = %record.id, error = %e, "Preview snapshot write failed");
            }
        }
        Err(e) => {
            tracing::warn!(record_id = %record.id, error = %e, "Preview snapshot serialization failed");
        }
    }

    match record.domain.as_deref() {
        Some(domain) if !domain.is_empty() => {
            PreviewTarget::External(format!("https://{domain}/#{PREVIEW_FRAGMENT}"))
        }
        _ => PreviewTarget::InApp(Route::Preview),
    }
}

// ---------------------------------------------------------------------------
// MemoryPreviewChannel
// ---------------------------------------------------------------------------

/// In-process preview slot used by tests and the in-app preview surface.
#[derive(Default)]
pub struct MemoryPreviewChannel {
    slot: Mutex<Option<String>>,
    fail_writes: Mutex<bool>,
}

impl MemoryPreviewChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put` fail, mimicking storage quota exhaustion.
    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }
}

impl PreviewChannel for MemoryPreviewChannel {
    fn put(&self, payload: &str) -> Result<(), PreviewError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(PreviewError::Write("quota exceeded".to_string()));
        }
        *self.slot.lock().unwrap() = Some(payload.to_string());
        Ok(())
    }

    fn get(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
