pub mod city;
pub mod styles;

use crate::constants::{CORS_ALLOW_HEADERS, UPSTREAM_USER_AGENT};
use crate::error::{AppError, Result};
use crate::services::{ProxyStats, SharedProxyStats};
use crate::utils::{get_upstream_base_url, get_upstream_styles_url, get_upstream_timeout};
use axum::{
    extract::State,
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN},
        HeaderMap, HeaderValue,
    },
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Url;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

/// Upstream locations and limits for the proxy
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub upstream_base_url: Url,
    pub styles_url: Url,
    pub timeout: Duration,
}

impl ProxyConfig {
    pub fn new(upstream_base_url: &str, styles_url: &str, timeout: Duration) -> Result<Self> {
        let upstream_base_url = Url::parse(upstream_base_url.trim().trim_end_matches('/'))
            .map_err(|e| AppError::Config(format!("Invalid upstream URL '{}': {}", upstream_base_url, e)))?;
        let styles_url = Url::parse(styles_url.trim())
            .map_err(|e| AppError::Config(format!("Invalid styles URL '{}': {}", styles_url, e)))?;

        Ok(Self {
            upstream_base_url,
            styles_url,
            timeout,
        })
    }

    /// `UPSTREAM_BASE_URL`, `UPSTREAM_STYLES_URL` and `UPSTREAM_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::new(&get_upstream_base_url(), &get_upstream_styles_url(), get_upstream_timeout())
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub config: Arc<ProxyConfig>,
    pub stats: SharedProxyStats,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(ACCEPT, reqwest::header::HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, reqwest::header::HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, reqwest::header::HeaderValue::from_static(UPSTREAM_USER_AGENT));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: Arc::new(config),
            stats: Arc::new(RwLock::new(ProxyStats::default())),
            started_at: Instant::now(),
        })
    }
}

/// Permissive CORS headers advertising `methods`
pub fn cors_headers(methods: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(methods));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(CORS_ALLOW_HEADERS));
    headers
}

/// GET /health - uptime and proxy counters
pub async fn health_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    let stats = app_state.stats.read().await.clone();
    Json(serde_json::json!({
        "status": "ok",
        "uptime_secs": app_state.started_at.elapsed().as_secs(),
        "city_requests": stats.city_requests,
        "styles_requests": stats.styles_requests,
        "upstream_errors": stats.upstream_errors,
        "fallbacks_served": stats.fallbacks_served,
    }))
}

/// Build the proxy router
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/city/{city}",
            get(city::city_handler).options(city::city_options_handler),
        )
        .route(
            "/api/styles",
            get(styles::styles_handler).options(styles::styles_options_handler),
        )
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the axum server
pub async fn serve(config: ProxyConfig, port: u16) -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting exchange-rate proxy");
    tracing::info!(upstream = %config.upstream_base_url, styles = %config.styles_url, timeout = ?config.timeout, "Upstream configuration");

    let app_state = AppState::new(config)?;

    tracing::info!("Registering routes:");
    tracing::info!("  GET|OPTIONS /api/city/{{city}}");
    tracing::info!("  GET|OPTIONS /api/styles");
    tracing::info!("  GET /health");

    let app = router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
