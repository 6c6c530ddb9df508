use crate::error::Error;
use crate::models::RateHistory;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::constants::UPSTREAM_USER_AGENT;

/// Source of rate history for a city
pub trait RateSource: Send + Sync {
    fn fetch_city(&self, city: &str) -> impl Future<Output = Result<RateHistory, Error>> + Send;
}

/// Source of raw palette records
///
/// Records are returned undecoded so that a single malformed palette does not
/// discard the rest of the catalog.
pub trait PaletteSource: Send + Sync {
    fn fetch_palettes(&self) -> impl Future<Output = Result<Vec<Value>, Error>> + Send;
}

/// Client for the dashboard API (`/api/city/{city}` and `/api/styles`)
///
/// Usually pointed at the proxy; pointing it at the rate service directly
/// works as well since the paths are the same.
#[derive(Clone)]
pub struct DashboardClient {
    base_url: Url,
    client: reqwest::Client,
}

impl DashboardClient {
    /// Create a new API client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API (e.g., "http://localhost:3000")
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let trimmed = base_url.trim().trim_end_matches('/');

        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(Error::Config(format!(
                "Invalid base_url: must start with http:// or https://, got: '{}'",
                trimmed
            )));
        }

        let base_url = Url::parse(trimmed)
            .map_err(|e| Error::Config(format!("Invalid base_url '{}': {}", trimmed, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(UPSTREAM_USER_AGENT));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        info!("Created DashboardClient: base_url='{}'", base_url);

        Ok(Self { base_url, client })
    }

    /// `<base>/api/city/<city>` with the city percent-encoded
    pub fn city_url(&self, city: &str) -> Result<Url, Error> {
        join_segments(&self.base_url, &["api", "city", city])
    }

    pub fn styles_url(&self) -> Result<Url, Error> {
        join_segments(&self.base_url, &["api", "styles"])
    }
}

/// Append path segments to a base URL, percent-encoding each one
pub fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, Error> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| Error::Config(format!("URL cannot be a base: {}", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Error message for a non-2xx answer, preferring the body's `error` field
fn upstream_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            format!(
                "Failed to fetch data: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            )
            .trim_end()
            .to_string()
        })
}

impl RateSource for DashboardClient {
    async fn fetch_city(&self, city: &str) -> Result<RateHistory, Error> {
        let url = self.city_url(city)?;
        debug!(%url, city, "Fetching city data");

        let response = self.client.get(url).send().await.map_err(|e| {
            error!(city, error = %e, "Network error while fetching city data");
            Error::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = upstream_error_message(status, &body);
            error!(city, status = status.as_u16(), %message, "API error for city");
            return Err(Error::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response body: {}", e)))?;

        let data: RateHistory = serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("Failed to parse city data: {}", e)))?;

        info!(city, records = data.len(), "Fetched city records");
        Ok(data)
    }
}

impl PaletteSource for DashboardClient {
    async fn fetch_palettes(&self) -> Result<Vec<Value>, Error> {
        let url = self.styles_url()?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream {
                status: status.as_u16(),
                message: format!("HTTP {}", status),
            });
        }

        let palettes: Vec<Value> = response
            .json()
            .await
            .map_err(|e| Error::Parse(format!("Failed to parse palettes: {}", e)))?;
        Ok(palettes)
    }
}
