//! Dashboard session.
//!
//! Owns everything one dashboard view needs: the selected city and rate type,
//! the fetched observations, loading/error state, the switching flag and the
//! converter. Fetches are tagged with a generation number so that only the
//! most recently issued request can update the view.

use crate::constants::RATE_TYPE_SWITCH_DELAY_MS;
use crate::models::{
    ChartProjection, City, DerivedRateSnapshot, ExchangeObservation, RateHistory, RateTrend, RateType,
};
use crate::services::chart_data::project_chart;
use crate::services::converter::CurrencyConverter;
use crate::services::dashboard_client::RateSource;
use crate::services::rate_change::compute_snapshot;
use crate::services::rate_selection::partition_rates;
use crate::services::rate_type_switch::RateTypeSwitch;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// What happened to a fetch once it resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { records: usize },
    Failed,
    /// A newer fetch was issued meanwhile; the response was dropped
    Stale,
}

#[derive(Debug)]
struct SessionState {
    city: String,
    rate_type: RateType,
    observations: RateHistory,
    loading: bool,
    error: Option<String>,
    generation: u64,
    converter: CurrencyConverter,
}

/// Everything the dashboard renders, derived from the session state
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub city: String,
    pub rate_type: RateType,
    pub latest: Option<ExchangeObservation>,
    /// Latest observation belongs to another rate type
    pub latest_is_fallback: bool,
    pub snapshot: DerivedRateSnapshot,
    pub trend: RateTrend,
    pub chart: ChartProjection,
    pub loading: bool,
    pub switching: bool,
    pub error: Option<String>,
    pub usd_amount: String,
    pub iqd_amount: String,
}

pub struct DashboardSession<S> {
    source: Arc<S>,
    state: RwLock<SessionState>,
    switch: RateTypeSwitch,
}

impl<S: RateSource> DashboardSession<S> {
    /// Session on the default city with the penji rate selected; nothing is fetched yet
    pub fn new(source: Arc<S>) -> Self {
        Self::with_switch_delay(source, Duration::from_millis(RATE_TYPE_SWITCH_DELAY_MS))
    }

    pub fn with_switch_delay(source: Arc<S>, delay: Duration) -> Self {
        Self {
            source,
            state: RwLock::new(SessionState {
                city: City::default_city().value.to_string(),
                rate_type: RateType::default(),
                observations: Vec::new(),
                loading: true,
                error: None,
                generation: 0,
                converter: CurrencyConverter::default(),
            }),
            switch: RateTypeSwitch::new(delay),
        }
    }

    /// Select a city and fetch its history
    ///
    /// Previous observations stay visible until the response arrives. If another
    /// fetch is issued before this one resolves, this response is discarded.
    #[instrument(skip(self))]
    pub async fn load_city(&self, city: &str) -> FetchOutcome {
        let generation = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.city = city.to_string();
            state.loading = true;
            state.error = None;
            state.generation
        };

        let result = self.source.fetch_city(city).await;

        let mut state = self.state.write().await;
        if state.generation != generation {
            debug!(generation, current = state.generation, "Discarding stale city response");
            return FetchOutcome::Stale;
        }

        state.loading = false;
        let outcome = match result {
            Ok(observations) => {
                info!(records = observations.len(), "City data applied");
                let records = observations.len();
                state.observations = observations;
                FetchOutcome::Applied { records }
            }
            Err(e) => {
                warn!(error = %e, "City fetch failed");
                state.error = Some(e.user_message());
                FetchOutcome::Failed
            }
        };
        sync_converter(&mut state);
        outcome
    }

    /// Re-issue the fetch for the current city
    pub async fn retry(&self) -> FetchOutcome {
        let city = self.state.read().await.city.clone();
        self.load_city(&city).await
    }

    /// Switch denomination; raises the switching flag for a short moment
    pub async fn select_rate_type(&self, rate_type: RateType) {
        let mut state = self.state.write().await;
        state.rate_type = rate_type;
        self.switch.trigger();
        sync_converter(&mut state);
    }

    pub async fn edit_usd(&self, value: &str) {
        self.state.write().await.converter.edit_usd(value);
    }

    pub async fn edit_iqd(&self, value: &str) {
        self.state.write().await.converter.edit_iqd(value);
    }

    pub async fn view(&self) -> DashboardView {
        let state = self.state.read().await;
        let selection = partition_rates(&state.observations, state.rate_type);
        let snapshot = compute_snapshot(&selection.filtered, selection.latest.as_ref());
        let chart = project_chart(&selection.filtered);

        DashboardView {
            city: state.city.clone(),
            rate_type: state.rate_type,
            latest_is_fallback: selection.is_fallback(),
            latest: selection.latest,
            trend: snapshot.trend(),
            snapshot,
            chart,
            loading: state.loading,
            switching: self.switch.is_switching(),
            error: state.error.clone(),
            usd_amount: state.converter.usd().to_string(),
            iqd_amount: state.converter.iqd().to_string(),
        }
    }
}

/// Feed the converter the rate currently on display
fn sync_converter(state: &mut SessionState) {
    let rate = partition_rates(&state.observations, state.rate_type).latest_rate();
    state.converter.set_rate(rate);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Result};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Answers per city after a per-city delay
    #[derive(Default)]
    struct FakeSource {
        responses: Mutex<HashMap<String, (u64, std::result::Result<RateHistory, u16>)>>,
    }

    impl FakeSource {
        fn respond(&self, city: &str, delay_ms: u64, data: std::result::Result<RateHistory, u16>) {
            self.responses
                .lock()
                .unwrap()
                .insert(city.to_string(), (delay_ms, data));
        }
    }

    impl RateSource for FakeSource {
        async fn fetch_city(&self, city: &str) -> Result<RateHistory> {
            let entry = self.responses.lock().unwrap().get(city).cloned();
            let (delay, data) = entry.unwrap_or((0, Ok(Vec::new())));
            tokio::time::sleep(Duration::from_millis(delay)).await;
            data.map_err(|status| AppError::Upstream {
                status,
                message: format!("API returned {}", status),
            })
        }
    }

    fn obs(city: &str, rate_type: RateType, rate: i64, day: u32) -> ExchangeObservation {
        ExchangeObservation {
            id: day as i64,
            city: city.to_string(),
            rate_type: Some(rate_type),
            rate,
            timestamp: format!("2024-05-{:02}T10:00:00Z", day),
            message_id: None,
        }
    }

    #[tokio::test]
    async fn test_load_and_view() {
        let source = Arc::new(FakeSource::default());
        source.respond(
            "A",
            0,
            Ok(vec![
                obs("A", RateType::Penji, 150000, 1),
                obs("A", RateType::Penji, 152000, 2),
                obs("A", RateType::Sur, 151000, 3),
            ]),
        );
        let session = DashboardSession::new(source);

        assert_eq!(session.load_city("A").await, FetchOutcome::Applied { records: 3 });
        let view = session.view().await;
        assert_eq!(view.city, "A");
        assert!(!view.loading);
        assert_eq!(view.snapshot.current_rate, 1520.0);
        assert_eq!(view.snapshot.rate_change, 20.0);
        assert_eq!(view.trend, RateTrend::Up);
        assert_eq!(view.chart.points.len(), 2);
        assert!(!view.latest_is_fallback);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_issued_fetch_wins() {
        let source = Arc::new(FakeSource::default());
        source.respond("slow", 500, Ok(vec![obs("slow", RateType::Penji, 140000, 1)]));
        source.respond("fast", 10, Ok(vec![obs("fast", RateType::Penji, 150000, 1)]));
        let session = DashboardSession::new(source);

        let (first, second) = tokio::join!(session.load_city("slow"), async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            session.load_city("fast").await
        });

        assert_eq!(first, FetchOutcome::Stale);
        assert_eq!(second, FetchOutcome::Applied { records: 1 });
        let view = session.view().await;
        assert_eq!(view.city, "fast");
        assert_eq!(view.snapshot.current_rate, 1500.0);
    }

    #[tokio::test]
    async fn test_error_then_retry() {
        let source = Arc::new(FakeSource::default());
        source.respond("A", 0, Err(503));
        let session = DashboardSession::new(source.clone());

        assert_eq!(session.load_city("A").await, FetchOutcome::Failed);
        let view = session.view().await;
        assert_eq!(view.error.as_deref(), Some("API returned 503"));
        assert!(!view.loading);

        source.respond("A", 0, Ok(vec![obs("A", RateType::Penji, 150000, 1)]));
        assert_eq!(session.retry().await, FetchOutcome::Applied { records: 1 });
        assert!(session.view().await.error.is_none());
    }

    #[tokio::test]
    async fn test_empty_city_clears_converter() {
        let source = Arc::new(FakeSource::default());
        source.respond("A", 0, Ok(vec![obs("A", RateType::Penji, 150000, 1)]));
        source.respond("B", 0, Ok(vec![]));
        let session = DashboardSession::new(source);

        session.load_city("A").await;
        session.edit_usd("10").await;
        let view = session.view().await;
        assert_eq!(view.iqd_amount, "15000");

        session.load_city("B").await;
        let view = session.view().await;
        assert!(view.latest.is_none());
        assert_eq!(view.usd_amount, "");
        assert_eq!(view.iqd_amount, "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_type_switch_uses_fallback_latest() {
        let source = Arc::new(FakeSource::default());
        source.respond("A", 0, Ok(vec![obs("A", RateType::Penji, 150000, 1)]));
        let session = DashboardSession::new(source);
        session.load_city("A").await;

        session.select_rate_type(RateType::Sur).await;
        let view = session.view().await;
        assert!(view.switching);
        assert_eq!(view.rate_type, RateType::Sur);
        assert!(view.latest_is_fallback);
        assert_eq!(view.snapshot.current_rate, 1500.0);
        assert!(view.chart.is_empty());

        tokio::time::sleep(Duration::from_millis(RATE_TYPE_SWITCH_DELAY_MS + 1)).await;
        assert!(!session.view().await.switching);
    }
}
