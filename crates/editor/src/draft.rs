//! The draft editor state machine.
//!
//! Holds exactly one record open for editing inside the owning user's row.
//! The editor borrows the row exclusively for the editing session, so no
//! other row mutation can interleave with it. Operations here never fail in
//! the ordinary sense (no I/O, no validation); malformed input such as an
//! empty tag is the caller's responsibility to avoid. Every record mutation
//! sends the whole row to the autosave handle, which owns the debounce.

use vitrine_core::record::MAX_SCREENSHOTS;
use vitrine_core::{merge_defaults, Comment, CoreError, DraftRecord, PartialDraftRecord};
use vitrine_store::UserRow;
use vitrine_sync::AutosaveHandle;

use crate::section::Section;

/// A comment being composed or edited, staged outside the record until the
/// user confirms.
#[derive(Debug)]
struct PendingComment {
    comment: Comment,
    /// `true` when editing an existing comment (confirm replaces in place),
    /// `false` for a fresh one (confirm inserts at the head).
    existing: bool,
}

/// Multi-section editor for a single draft record.
///
/// Exclusively borrows the user's row for its lifetime; dropping the editor
/// ends the session and releases the row.
#[derive(Debug)]
pub struct DraftEditor<'a> {
    row: &'a mut UserRow,
    record_id: String,
    section: Section,
    pending_comment: Option<PendingComment>,
    autosave: AutosaveHandle,
}

impl<'a> DraftEditor<'a> {
    /// Open an existing record of `row` for editing.
    pub fn open(
        row: &'a mut UserRow,
        record_id: &str,
        autosave: AutosaveHandle,
    ) -> Result<Self, CoreError> {
        if !row.pwas.iter().any(|r| r.id == record_id) {
            return Err(CoreError::NotFound {
                entity: "record",
                id: record_id.to_string(),
            });
        }
        Ok(Self {
            row,
            record_id: record_id.to_string(),
            section: Section::Domain,
            pending_comment: None,
            autosave,
        })
    }

    /// Open a new record seeded from an optional partial.
    ///
    /// Supplied fields win over the default table; no partial at all means
    /// pure defaults with a generated id. The record is appended to the row
    /// and marked dirty immediately so it survives an early tab close.
    pub fn open_new(
        row: &'a mut UserRow,
        seed: Option<PartialDraftRecord>,
        autosave: AutosaveHandle,
    ) -> Self {
        let record = merge_defaults(seed.unwrap_or_default());
        let record_id = record.id.clone();
        row.pwas.push(record);

        let editor = Self {
            row,
            record_id,
            section: Section::Domain,
            pending_comment: None,
            autosave,
        };
        editor.mark_dirty();
        editor
    }

    /// The record being edited.
    pub fn record(&self) -> &DraftRecord {
        // The id was checked at construction and is immutable after.
        self.row
            .pwas
            .iter()
            .find(|r| r.id == self.record_id)
            .expect("edited record present in row")
    }

    fn record_mut(&mut self) -> &mut DraftRecord {
        let id = self.record_id.clone();
        self.row
            .pwas
            .iter_mut()
            .find(|r| r.id == id)
            .expect("edited record present in row")
    }

    fn mark_dirty(&self) {
        self.autosave.mark_dirty(self.row.clone());
    }

    // -----------------------------------------------------------------------
    // Field updates
    // -----------------------------------------------------------------------

    /// Apply one atomic update to the record and mark the row dirty.
    ///
    /// This is the single entry point for field replacement; no validation
    /// happens here by contract (ratings are not clamped, URLs are not
    /// checked).
    pub fn update(&mut self, f: impl FnOnce(&mut DraftRecord)) {
        f(self.record_mut());
        self.mark_dirty();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.update(|r| r.name = name);
    }

    pub fn set_domain(&mut self, domain: Option<String>) {
        self.update(|r| r.domain = domain);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        self.update(|r| r.description = description);
    }

    pub fn set_rating(&mut self, rating: f64) {
        self.update(|r| r.rating = rating);
    }

    pub fn set_offer_url(&mut self, offer_url: impl Into<String>) {
        let offer_url = offer_url.into();
        self.update(|r| r.offer_url = offer_url);
    }

    // -----------------------------------------------------------------------
    // Sections
    // -----------------------------------------------------------------------

    pub fn active_section(&self) -> Section {
        self.section
    }

    /// Pure tab switch; does not touch the record.
    pub fn set_active_section(&mut self, section: Section) {
        self.section = section;
    }

    /// Request an explicit save, then move to the next section.
    ///
    /// Returns `false` (after still flushing) when already on the last tab.
    pub fn advance_section(&mut self) -> bool {
        self.autosave.flush();
        match self.section.next() {
            Some(next) => {
                self.section = next;
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Comments (staged in the scratch slot, merged on confirm)
    // -----------------------------------------------------------------------

    /// Start composing a new comment in the scratch slot.
    ///
    /// The record is untouched until [`confirm_comment`](Self::confirm_comment).
    pub fn begin_comment(&mut self) -> &Comment {
        let pending = self.pending_comment.insert(PendingComment {
            comment: Comment::blank(),
            existing: false,
        });
        &pending.comment
    }

    /// Stage an existing comment for editing.
    pub fn begin_edit_comment(&mut self, id: &str) -> Result<&Comment, CoreError> {
        let comment = self
            .record()
            .comments
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                entity: "comment",
                id: id.to_string(),
            })?;
        let pending = self.pending_comment.insert(PendingComment {
            comment,
            existing: true,
        });
        Ok(&pending.comment)
    }

    /// Edit the staged comment. No-op when nothing is staged.
    pub fn edit_pending(&mut self, f: impl FnOnce(&mut Comment)) {
        if let Some(pending) = self.pending_comment.as_mut() {
            f(&mut pending.comment);
        }
    }

    /// The staged comment, if any.
    pub fn pending_comment(&self) -> Option<&Comment> {
        self.pending_comment.as_ref().map(|p| &p.comment)
    }

    /// Merge the scratch slot into the record: a new comment is inserted at
    /// the head, an edited one replaces its original in place.
    pub fn confirm_comment(&mut self) {
        let Some(pending) = self.pending_comment.take() else {
            return;
        };
        let record = self.record_mut();
        if pending.existing {
            if let Some(slot) = record
                .comments
                .iter_mut()
                .find(|c| c.id == pending.comment.id)
            {
                *slot = pending.comment;
            }
        } else {
            record.comments.insert(0, pending.comment);
        }
        self.mark_dirty();
    }

    /// Discard the scratch slot without mutating the record.
    pub fn cancel_comment(&mut self) {
        self.pending_comment = None;
    }

    /// Remove the comment with this id, leaving the order of the rest
    /// unchanged. No-op for an unknown id.
    pub fn remove_comment(&mut self, id: &str) {
        let record = self.record_mut();
        let before = record.comments.len();
        record.comments.retain(|c| c.id != id);
        if record.comments.len() != before {
            self.mark_dirty();
        }
    }

    // -----------------------------------------------------------------------
    // Screenshots
    // -----------------------------------------------------------------------

    /// Append a screenshot. Silently ignored once the record already holds
    /// the maximum of six; the bound is enforced only here, not as a
    /// standing invariant.
    pub fn add_screenshot(&mut self, payload: impl Into<String>) {
        if self.record().screenshots.len() >= MAX_SCREENSHOTS {
            return;
        }
        let payload = payload.into();
        self.update(|r| r.screenshots.push(payload));
    }

    /// Remove the screenshot at this position. Out-of-range is a no-op.
    pub fn remove_screenshot(&mut self, index: usize) {
        if index >= self.record().screenshots.len() {
            return;
        }
        self.update(|r| {
            r.screenshots.remove(index);
        });
    }

    // -----------------------------------------------------------------------
    // Tags
    // -----------------------------------------------------------------------

    /// Append a tag. Insertion order is display order; duplicates are not
    /// rejected here.
    pub fn add_tag(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.update(|r| r.tags.push(text));
    }

    /// Remove every tag equal to `text`.
    pub fn remove_tag(&mut self, text: &str) {
        self.update(|r| r.tags.retain(|t| t != text));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
