use crate::models::{scale_rate, DerivedRateSnapshot, ExchangeObservation};

/// Derive the latest-vs-previous change for one denomination
///
/// `filtered` must be the chronologically sorted series of the selected
/// denomination and `latest` the observation chosen for display. With fewer
/// than two observations the previous rate equals the current one, so the
/// change is zero. A zero previous rate yields a zero percentage.
pub fn compute_snapshot(
    filtered: &[ExchangeObservation],
    latest: Option<&ExchangeObservation>,
) -> DerivedRateSnapshot {
    let current_rate = latest.map(|o| scale_rate(o.rate)).unwrap_or(0.0);

    let previous_rate = if filtered.len() > 1 {
        scale_rate(filtered[filtered.len() - 2].rate)
    } else {
        current_rate
    };

    let rate_change = current_rate - previous_rate;
    let rate_change_percent = if previous_rate == 0.0 {
        0.0
    } else {
        (rate_change / previous_rate) * 100.0
    };

    DerivedRateSnapshot {
        current_rate,
        rate_change,
        rate_change_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RateType;
    use crate::services::rate_selection::partition_rates;

    fn obs(rate: i64, timestamp: &str) -> ExchangeObservation {
        ExchangeObservation {
            id: rate,
            city: "هەولێر".to_string(),
            rate_type: Some(RateType::Penji),
            rate,
            timestamp: timestamp.to_string(),
            message_id: None,
        }
    }

    #[test]
    fn test_two_observations() {
        let data = vec![obs(150000, "2024-05-01T10:00:00Z"), obs(152000, "2024-05-02T10:00:00Z")];
        let selection = partition_rates(&data, RateType::Penji);
        let snapshot = compute_snapshot(&selection.filtered, selection.latest.as_ref());

        assert_eq!(selection.latest.as_ref().unwrap().rate, 152000);
        assert_eq!(snapshot.current_rate, 1520.0);
        assert_eq!(snapshot.rate_change, 20.0);
        assert!((snapshot.rate_change_percent - 4.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_observation_has_zero_change() {
        let data = vec![obs(150000, "2024-05-01T10:00:00Z")];
        let snapshot = compute_snapshot(&data, data.last());
        assert_eq!(snapshot.current_rate, 1500.0);
        assert_eq!(snapshot.rate_change, 0.0);
        assert_eq!(snapshot.rate_change_percent, 0.0);
    }

    #[test]
    fn test_no_data() {
        let snapshot = compute_snapshot(&[], None);
        assert_eq!(snapshot, DerivedRateSnapshot::default());
    }

    #[test]
    fn test_fallback_latest_without_history() {
        // Denomination has no history, latest came from another type
        let other = obs(151000, "2024-05-01T10:00:00Z");
        let snapshot = compute_snapshot(&[], Some(&other));
        assert_eq!(snapshot.current_rate, 1510.0);
        assert_eq!(snapshot.rate_change, 0.0);
        assert_eq!(snapshot.rate_change_percent, 0.0);
    }

    #[test]
    fn test_zero_previous_rate() {
        let data = vec![obs(0, "2024-05-01T10:00:00Z"), obs(152000, "2024-05-02T10:00:00Z")];
        let snapshot = compute_snapshot(&data, data.last());
        assert_eq!(snapshot.rate_change, 1520.0);
        assert_eq!(snapshot.rate_change_percent, 0.0);
    }

    #[test]
    fn test_decline() {
        let data = vec![
            obs(153000, "2024-05-01T10:00:00Z"),
            obs(152000, "2024-05-02T10:00:00Z"),
            obs(151000, "2024-05-03T10:00:00Z"),
        ];
        let snapshot = compute_snapshot(&data, data.last());
        assert_eq!(snapshot.rate_change, -10.0);
        assert!((snapshot.rate_change_percent - (-10.0 / 1520.0 * 100.0)).abs() < 1e-9);
    }
}
