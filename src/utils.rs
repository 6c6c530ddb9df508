pub mod time;

use crate::constants::{
    DEFAULT_DASHBOARD_API_URL, DEFAULT_PREFS_FILE, DEFAULT_UPSTREAM_BASE_URL,
    DEFAULT_UPSTREAM_TIMEOUT_SECS,
};
use crate::models::ThemeName;
use std::path::PathBuf;
use std::time::Duration;

pub use time::{format_full_date, format_short_date, parse_timestamp};

/// Get the rate service base URL from environment variable or use default
pub fn get_upstream_base_url() -> String {
    std::env::var("UPSTREAM_BASE_URL")
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_UPSTREAM_BASE_URL.to_string())
}

/// Get the palette service URL, derived from the base URL unless overridden
pub fn get_upstream_styles_url() -> String {
    std::env::var("UPSTREAM_STYLES_URL")
        .unwrap_or_else(|_| format!("{}/api/styles", get_upstream_base_url()))
}

/// Get the upstream request timeout (`UPSTREAM_TIMEOUT_SECS`)
pub fn get_upstream_timeout() -> Duration {
    let secs = std::env::var("UPSTREAM_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Get the API location used by dashboard clients (the proxy by default)
pub fn get_dashboard_api_url() -> String {
    std::env::var("DASHBOARD_API_URL")
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_DASHBOARD_API_URL.to_string())
}

/// Get the preference file path from environment variable or use default
pub fn get_prefs_path() -> PathBuf {
    std::env::var("THEME_PREFS_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_PREFS_FILE))
}

/// System-level light/dark hint (`COLOR_SCHEME=dark|light`)
pub fn get_system_color_scheme() -> Option<ThemeName> {
    std::env::var("COLOR_SCHEME")
        .ok()
        .and_then(|v| ThemeName::from_str(&v).ok())
}

/// Initialize tracing with `RUST_LOG` support, defaulting to `info`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .try_init();
}
