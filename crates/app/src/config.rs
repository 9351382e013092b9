use std::time::Duration;

/// Application configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the row store (default: `http://localhost:8090`).
    pub store_base_url: String,
    /// Endpoint of the domain-registration collaborator
    /// (default: `http://localhost:8091/domains`).
    pub domain_api_url: String,
    /// Debounce window before a mutation is persisted
    /// (default: `1000` ms).
    pub autosave_debounce: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                        |
    /// |------------------------|--------------------------------|
    /// | `STORE_BASE_URL`       | `http://localhost:8090`        |
    /// | `DOMAIN_API_URL`       | `http://localhost:8091/domains`|
    /// | `AUTOSAVE_DEBOUNCE_MS` | `1000`                         |
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let store_base_url =
            std::env::var("STORE_BASE_URL").unwrap_or_else(|_| "http://localhost:8090".into());

        let domain_api_url = std::env::var("DOMAIN_API_URL")
            .unwrap_or_else(|_| "http://localhost:8091/domains".into());

        let debounce_ms: u64 = std::env::var("AUTOSAVE_DEBOUNCE_MS")
            .unwrap_or_else(|_| "1000".into())
            .parse()
            .expect("AUTOSAVE_DEBOUNCE_MS must be a valid u64");

        Self {
            store_base_url,
            domain_api_url,
            autosave_debounce: Duration::from_millis(debounce_ms),
        }
    }

    /// Build the production row-store client for this configuration.
    pub fn rest_store(&self, client: reqwest::Client) -> vitrine_store::RestStore {
        vitrine_store::RestStore::new(client, self.store_base_url.clone())
    }
}
