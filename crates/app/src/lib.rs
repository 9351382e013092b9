//! Application shell: per-session state, lifecycle, and configuration.
//!
//! Ties the collaborators together: the auth subscription drives
//! [`SessionManager`], which loads the user's row, spawns the autosave
//! controller, and hands an [`AppState`] to the surfaces. Dashboard and
//! invoice operations live on `AppState`; the editor takes the row over
//! while a record is open.

pub mod config;
pub mod session;
pub mod state;

pub use config::AppConfig;
pub use session::SessionManager;
pub use state::AppState;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing for a host binary.
///
/// `RUST_LOG` wins; the default filter keeps workspace crates at debug.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Kick off a best-effort domain registration without blocking the caller.
///
/// The outcome is logged inside the call; nothing is surfaced to the user.
pub fn register_domain_best_effort(client: reqwest::Client, endpoint: String, domain: String) {
    tokio::spawn(async move {
        vitrine_store::domains::register_domain(&client, &endpoint, &domain).await;
    });
}
