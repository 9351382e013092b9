//! The draft editor: one record, six sections, debounced persistence.
//!
//! [`DraftEditor`] exclusively borrows the user's row while a record is
//! being edited and applies atomic field updates, staged comment edits,
//! and the bounded screenshot/tag operations. Every mutation marks the row
//! dirty on the autosave handle; an explicit preview action snapshots the
//! draft into the shared preview channel for the read-only rendering twin.

pub mod draft;
pub mod preview;
pub mod section;

pub use draft::DraftEditor;
pub use preview::{
    snapshot_preview, MemoryPreviewChannel, PreviewChannel, PreviewError, PreviewTarget,
    PREVIEW_SLOT_KEY,
};
pub use section::Section;
