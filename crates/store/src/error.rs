/// Errors reported by the row store.
///
/// Callers only distinguish `NotFound` (benign empty state) from
/// "anything else"; the transport/backend split exists for logging.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No row exists for the requested user.
    #[error("Row not found")]
    NotFound,

    /// The request never reached the backend (network, DNS, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with an error.
    #[error("Store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// `true` for the benign missing-row case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}
