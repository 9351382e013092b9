//! Debounced autosave of the per-user row.
//!
//! The editor and dashboard mutate in-memory state freely; this crate
//! reconciles that state with the remote row store. Every mutation restarts
//! a fixed debounce window, rapid successive mutations collapse into a
//! single save, and the outcome is exposed as a tri-state status for the
//! UI's status pill.

pub mod autosave;
pub mod status;

pub use autosave::{load_row, Autosave, AutosaveHandle, DEFAULT_DEBOUNCE};
pub use status::SyncStatus;
