//! `/api/city/{city}` - pass-through proxy to the rate service.

use crate::constants::{CITY_ALLOW_METHODS, CITY_CACHE_CONTROL};
use crate::server::{cors_headers, AppState};
use crate::services::dashboard_client::join_segments;
use crate::services::{log_proxy_request, ProxyOutcome, ProxyRequestMetrics};
use axum::{
    extract::{Path, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument, warn};

/// GET /api/city/{city}
///
/// Success returns the upstream body untouched with CORS and a one minute
/// cache lifetime. Upstream errors keep their status code; transport failures
/// become 408 (timeout) or 500.
#[instrument(skip(app_state))]
pub async fn city_handler(
    State(app_state): State<AppState>,
    Path(city): Path<String>,
) -> Response {
    let mut metrics = ProxyRequestMetrics::new("/api/city", Utc::now());
    metrics.city = Some(city.clone());

    let response = proxy_city(&app_state, &city, &mut metrics).await;

    metrics.status = response.status().as_u16();
    metrics.complete();
    log_proxy_request(&app_state.stats, &metrics).await;

    response
}

/// OPTIONS /api/city/{city}
pub async fn city_options_handler() -> impl IntoResponse {
    (StatusCode::OK, cors_headers(CITY_ALLOW_METHODS))
}

async fn proxy_city(app_state: &AppState, city: &str, metrics: &mut ProxyRequestMetrics) -> Response {
    let url = match join_segments(&app_state.config.upstream_base_url, &["api", "city", city]) {
        Ok(url) => url,
        Err(e) => {
            error!(error = %e, "Cannot build upstream URL");
            metrics.outcome = ProxyOutcome::NetworkError;
            return internal_error();
        }
    };
    debug!(%url, "Fetching data for city");

    let response = match app_state.client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return transport_failure(e, metrics),
    };

    let status = response.status();
    debug!(status = status.as_u16(), "Upstream responded");

    if !status.is_success() {
        let details = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        warn!(status = status.as_u16(), %details, "Upstream returned error status");
        metrics.outcome = ProxyOutcome::UpstreamError;

        return (
            status,
            Json(json!({
                "error": format!(
                    "API returned {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("")
                ),
                "details": details,
                "city": city,
            })),
        )
            .into_response();
    }

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => return transport_failure(e, metrics),
    };

    let records = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Array(items)) => Some(items.len()),
        Ok(_) => None,
        Err(e) => {
            error!(error = %e, "Upstream body is not JSON");
            metrics.outcome = ProxyOutcome::NetworkError;
            return internal_error();
        }
    };
    info!(?records, size = body.len(), "Proxied city data");

    metrics.outcome = ProxyOutcome::Upstream;
    metrics.response_size_bytes = body.len();

    let mut headers = cors_headers(CITY_ALLOW_METHODS);
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(CITY_CACHE_CONTROL));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    (StatusCode::OK, headers, body).into_response()
}

fn transport_failure(e: reqwest::Error, metrics: &mut ProxyRequestMetrics) -> Response {
    if e.is_timeout() {
        warn!(error = %e, "Upstream request timed out");
        metrics.outcome = ProxyOutcome::Timeout;
        return (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timeout: The API took too long to respond" })),
        )
            .into_response();
    }

    error!(error = %e, "Proxy API error");
    metrics.outcome = ProxyOutcome::NetworkError;
    internal_error()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error: Unable to fetch exchange rate data" })),
    )
        .into_response()
}
