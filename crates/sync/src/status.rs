/// Tri-state save status shown by the UI's status pill.
///
/// `Error` is sticky: it remains until the next save attempt succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Saved,
    Saving,
    Error,
}
