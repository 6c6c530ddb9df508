//! `/api/styles` - palette proxy that never fails.

use crate::constants::{STYLES_ALLOW_METHODS, STYLES_CACHE_CONTROL};
use crate::error::AppError;
use crate::models::fallback_palettes;
use crate::server::{cors_headers, AppState};
use crate::services::{log_proxy_request, ProxyOutcome, ProxyRequestMetrics};
use axum::{
    body::Bytes,
    extract::State,
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// GET /api/styles
///
/// Any upstream failure is answered with the built-in palettes and status 200.
#[instrument(skip_all)]
pub async fn styles_handler(State(app_state): State<AppState>) -> Response {
    let mut metrics = ProxyRequestMetrics::new("/api/styles", Utc::now());

    let response = match fetch_styles(&app_state).await {
        Ok(body) => {
            debug!(size = body.len(), "Proxied palettes");
            metrics.outcome = ProxyOutcome::Upstream;
            metrics.response_size_bytes = body.len();

            let mut headers = cors_headers(STYLES_ALLOW_METHODS);
            headers.insert(CACHE_CONTROL, HeaderValue::from_static(STYLES_CACHE_CONTROL));
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            (StatusCode::OK, headers, body).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Theme API error, serving fallback palettes");
            metrics.outcome = ProxyOutcome::Fallback;
            Json(fallback_palettes()).into_response()
        }
    };

    metrics.status = response.status().as_u16();
    metrics.complete();
    log_proxy_request(&app_state.stats, &metrics).await;

    response
}

/// OPTIONS /api/styles
pub async fn styles_options_handler() -> impl IntoResponse {
    (StatusCode::OK, cors_headers(STYLES_ALLOW_METHODS))
}

async fn fetch_styles(app_state: &AppState) -> Result<Bytes, AppError> {
    let response = app_state
        .client
        .get(app_state.config.styles_url.clone())
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Upstream {
            status: status.as_u16(),
            message: format!("HTTP {}", status),
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice::<Value>(&body)?;
    Ok(body)
}
