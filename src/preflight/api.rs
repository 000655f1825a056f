//! Catalog API preflight check.

use super::CheckResult;
use crate::models::config::ApiConfig;
use crate::services::api::CatalogClient;

/// Check if the catalog API answers.
pub async fn check(config: &ApiConfig) -> CheckResult {
    match CatalogClient::new(config) {
        Ok(client) => match client.health_check().await {
            Ok(true) => CheckResult::passed(
                "Catalog API",
                format!("reachable ({})", client.base_url()),
            ),
            Ok(false) | Err(_) => CheckResult::failed(
                "Catalog API",
                format!("no response from {}", client.base_url()),
                "Start the API server or set CINESTREAM_API_URL",
            ),
        },
        Err(e) => CheckResult::failed(
            "Catalog API",
            e.to_string(),
            "Check [api] in config.toml",
        ),
    }
}
