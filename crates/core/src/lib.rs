//! Domain model for the vitrine install-page builder.
//!
//! This crate is the leaf of the workspace: pure types and pure functions,
//! no I/O. It owns the draft record (the single editable entity), its
//! default-value table and merge rules, comments, invoices, the offer-URL
//! macro, and the fragment router shared by every surface.

pub mod comment;
pub mod error;
pub mod invoice;
pub mod offer;
pub mod record;
pub mod routes;

pub use comment::Comment;
pub use error::CoreError;
pub use invoice::{Invoice, InvoiceStatus};
pub use record::{merge_defaults, DraftRecord, PartialDraftRecord};
pub use routes::Route;
