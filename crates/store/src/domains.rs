//! Best-effort domain registration call.
//!
//! Fire-and-forget relative to the UI: the caller never waits on the
//! outcome and no failure is surfaced to the end user.

use serde_json::json;

/// Register a domain with the hosting collaborator.
///
/// 2xx and the "already in use" conflict (HTTP 409) both count as success;
/// everything else is logged and otherwise ignored.
pub async fn register_domain(client: &reqwest::Client, endpoint: &str, domain: &str) {
    let result = client
        .post(endpoint)
        .json(&json!({ "domain": domain }))
        .send()
        .await;

    match result {
        Ok(response) => {
            let status = response.status();
            if status.is_success() {
                tracing::debug!(domain, "Domain registered");
            } else if status == reqwest::StatusCode::CONFLICT {
                // Already in use counts as success: the domain is serving.
                tracing::debug!(domain, "Domain already registered");
            } else {
                tracing::warn!(domain, status = %status, "Domain registration rejected");
            }
        }
        Err(e) => {
            tracing::warn!(domain, error = %e, "Domain registration call failed");
        }
    }
}
