use crate::utils::error::Result;
use reqwest::Client;
use serde::Serialize;
use url::Url;

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub url: String,
    pub status: u16,
}

impl HealthReport {
    pub fn is_expected(&self, expected_status: u16) -> bool {
        self.status == expected_status
    }
}

/// Appends `endpoint` to `base_url` the way the config expects it: plain
/// concatenation, so a base with a path prefix keeps that prefix.
pub fn endpoint_url(base_url: &str, endpoint: &str) -> Result<Url> {
    let base = base_url.trim_end_matches('/');
    let path = endpoint.trim_start_matches('/');
    Ok(Url::parse(&format!("{}/{}", base, path))?)
}

/// Sends a GET to `base_url` + `endpoint` and reports the status code.
/// Non-2xx answers are reported, not turned into errors.
pub async fn check_health(
    client: &Client,
    base_url: &str,
    endpoint: &str,
) -> Result<HealthReport> {
    let url = endpoint_url(base_url, endpoint)?;

    tracing::debug!("Health check GET {}", url);
    let response = client.get(url.clone()).send().await?;
    let status = response.status().as_u16();
    tracing::info!("Health check {} -> {}", url, status);

    Ok(HealthReport {
        url: url.to_string(),
        status,
    })
}
