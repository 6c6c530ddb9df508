use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Per-request metrics of the proxy endpoints
#[derive(Debug, Clone)]
pub struct ProxyRequestMetrics {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_ms: u64,
    pub endpoint: String,
    pub city: Option<String>,
    pub status: u16,
    pub outcome: ProxyOutcome,
    pub response_size_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyOutcome {
    /// Upstream body passed through
    Upstream,
    /// Upstream answered with a non-2xx status
    UpstreamError,
    /// Built-in palettes served instead of the upstream answer
    Fallback,
    Timeout,
    NetworkError,
}

impl ProxyOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyOutcome::Upstream => "upstream",
            ProxyOutcome::UpstreamError => "upstream_error",
            ProxyOutcome::Fallback => "fallback",
            ProxyOutcome::Timeout => "timeout",
            ProxyOutcome::NetworkError => "network_error",
        }
    }
}

impl ProxyRequestMetrics {
    pub fn new(endpoint: &str, start_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time: start_time,
            duration_ms: 0,
            endpoint: endpoint.to_string(),
            city: None,
            status: 200,
            outcome: ProxyOutcome::Upstream,
            response_size_bytes: 0,
        }
    }

    pub fn complete(&mut self) {
        self.end_time = Utc::now();
        self.duration_ms = (self.end_time - self.start_time).num_milliseconds().max(0) as u64;
    }
}

/// Counters exposed on `/health`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProxyStats {
    pub city_requests: u64,
    pub styles_requests: u64,
    pub upstream_errors: u64,
    pub fallbacks_served: u64,
}

pub type SharedProxyStats = Arc<RwLock<ProxyStats>>;

impl ProxyStats {
    pub fn record(&mut self, metrics: &ProxyRequestMetrics) {
        if metrics.city.is_some() {
            self.city_requests += 1;
        } else {
            self.styles_requests += 1;
        }
        match metrics.outcome {
            ProxyOutcome::Upstream => {}
            ProxyOutcome::Fallback => self.fallbacks_served += 1,
            ProxyOutcome::UpstreamError | ProxyOutcome::Timeout | ProxyOutcome::NetworkError => {
                self.upstream_errors += 1
            }
        }
    }
}

/// Compact one-line summary of a proxied request
pub fn format_log_line(metrics: &ProxyRequestMetrics) -> String {
    let duration_str = if metrics.duration_ms >= 1000 {
        format!("{}.{:01}s", metrics.duration_ms / 1000, (metrics.duration_ms % 1000) / 100)
    } else {
        format!("{}ms", metrics.duration_ms)
    };

    let size_str = if metrics.response_size_bytes >= 1024 {
        format!("{}kb", metrics.response_size_bytes / 1024)
    } else {
        format!("{}b", metrics.response_size_bytes)
    };

    let city_info = match &metrics.city {
        Some(city) => format!(" city:{}", city),
        None => String::new(),
    };

    format!(
        "{} | {} | {} | {} | {} | size:{}{}",
        metrics.start_time.format("%Y-%m-%d %H:%M:%S"),
        duration_str,
        metrics.endpoint,
        metrics.status,
        metrics.outcome.as_str(),
        size_str,
        city_info
    )
}

/// Log a finished proxy request and count it
pub async fn log_proxy_request(stats: &SharedProxyStats, metrics: &ProxyRequestMetrics) {
    tracing::info!("{}", format_log_line(metrics));
    stats.write().await.record(metrics);
}
