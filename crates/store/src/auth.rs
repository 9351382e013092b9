//! Auth collaborator contract.
//!
//! The core never implements authentication; it consumes a [`Session`] and
//! reacts to session changes through the `subscribe` watch channel (login,
//! logout, token refresh all surface as a new value).

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{watch, Mutex};

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
}

/// Auth failures are surfaced as inline form text, so every variant
/// carries a human-readable message.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The credentials or request were rejected.
    #[error("{0}")]
    Rejected(String),

    /// The auth service was unreachable.
    #[error("Authentication service unavailable: {0}")]
    Transport(String),
}

/// The auth service contract.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// The current session, if any.
    async fn session(&self) -> Option<Session>;

    /// Observe session changes. The receiver yields the current value
    /// immediately and a new one on every login, logout, or refresh.
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Session, AuthError>;

    /// OAuth-style redirect sign-in. Implementations without provider
    /// support return [`AuthError::Rejected`].
    async fn sign_in_with_provider(&self, provider: &str) -> Result<Session, AuthError>;

    async fn sign_out(&self);
}

// ---------------------------------------------------------------------------
// MemoryAuth
// ---------------------------------------------------------------------------

struct RegisteredUser {
    password: String,
    full_name: String,
}

/// In-process [`AuthClient`] used by tests and local runs.
pub struct MemoryAuth {
    users: Mutex<HashMap<String, RegisteredUser>>,
    session_tx: watch::Sender<Option<Session>>,
}

impl Default for MemoryAuth {
    fn default() -> Self {
        let (session_tx, _) = watch::channel(None);
        Self {
            users: Mutex::new(HashMap::new()),
            session_tx,
        }
    }
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    fn session_for(email: &str, full_name: &str) -> Session {
        Session {
            // Deterministic id so repeated logins map to the same row.
            user_id: format!("user:{email}"),
            email: email.to_string(),
            full_name: full_name.to_string(),
        }
    }
}

#[async_trait]
impl AuthClient for MemoryAuth {
    async fn session(&self) -> Option<Session> {
        self.session_tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session_tx.subscribe()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let users = self.users.lock().await;
        let user = users
            .get(email)
            .ok_or_else(|| AuthError::Rejected("Invalid email or password".to_string()))?;
        if user.password != password {
            return Err(AuthError::Rejected("Invalid email or password".to_string()));
        }
        let session = Self::session_for(email, &user.full_name);
        drop(users);
        let _ = self.session_tx.send(Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Session, AuthError> {
        let mut users = self.users.lock().await;
        if users.contains_key(email) {
            return Err(AuthError::Rejected(
                "An account with this email already exists".to_string(),
            ));
        }
        users.insert(
            email.to_string(),
            RegisteredUser {
                password: password.to_string(),
                full_name: full_name.to_string(),
            },
        );
        let session = Self::session_for(email, full_name);
        drop(users);
        let _ = self.session_tx.send(Some(session.clone()));
        Ok(session)
    }

    async fn sign_in_with_provider(&self, provider: &str) -> Result<Session, AuthError> {
        Err(AuthError::Rejected(format!(
            "Provider sign-in via {provider} is not available here"
        )))
    }

    async fn sign_out(&self) {
        let _ = self.session_tx.send(None);
    }
}
