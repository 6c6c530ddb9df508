//! Rate partition and latest-observation selection.

use crate::models::{ExchangeObservation, RateType};

/// Observations of one denomination in chronological order, plus the observation to display
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateSelection {
    pub filtered: Vec<ExchangeObservation>,
    /// `None` only when there are no observations at all
    pub latest: Option<ExchangeObservation>,
}

impl RateSelection {
    /// Latest rate as IQD per USD, if any
    pub fn latest_rate(&self) -> Option<f64> {
        self.latest.as_ref().map(|o| o.rate_per_dollar())
    }

    /// True when `latest` had to come from another denomination
    pub fn is_fallback(&self) -> bool {
        self.filtered.is_empty() && self.latest.is_some()
    }
}

/// Stable ascending sort by observation time; unparsable timestamps sort first
pub fn sort_chronologically(observations: &mut [ExchangeObservation]) {
    observations.sort_by_cached_key(|o| o.observed_at());
}

/// Split out one denomination and choose the observation to display
///
/// When the denomination has no history the most recent observation of any
/// type is shown instead, so the dashboard always has something to display.
pub fn partition_rates(observations: &[ExchangeObservation], rate_type: RateType) -> RateSelection {
    let mut filtered: Vec<ExchangeObservation> = observations
        .iter()
        .filter(|o| o.is_type(rate_type))
        .cloned()
        .collect();
    sort_chronologically(&mut filtered);

    let latest = match filtered.last() {
        Some(last) => Some(last.clone()),
        None => {
            let mut all = observations.to_vec();
            sort_chronologically(&mut all);
            all.pop()
        }
    };

    RateSelection { filtered, latest }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(id: i64, rate_type: Option<RateType>, rate: i64, timestamp: &str) -> ExchangeObservation {
        ExchangeObservation {
            id,
            city: "سڵێمانی".to_string(),
            rate_type,
            rate,
            timestamp: timestamp.to_string(),
            message_id: None,
        }
    }

    #[test]
    fn test_filters_and_sorts() {
        let data = vec![
            obs(1, Some(RateType::Penji), 152000, "2024-05-02T10:00:00Z"),
            obs(2, Some(RateType::Sur), 151000, "2024-05-03T10:00:00Z"),
            obs(3, Some(RateType::Penji), 150000, "2024-05-01T10:00:00Z"),
        ];

        let selection = partition_rates(&data, RateType::Penji);
        let ids: Vec<i64> = selection.filtered.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(selection.latest.unwrap().id, 1);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let data = vec![
            obs(1, Some(RateType::Sur), 100, "2024-05-01T10:00:00Z"),
            obs(2, Some(RateType::Sur), 200, "2024-05-01T10:00:00Z"),
            obs(3, Some(RateType::Sur), 300, "2024-05-01T10:00:00Z"),
        ];
        let selection = partition_rates(&data, RateType::Sur);
        let ids: Vec<i64> = selection.filtered.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(selection.latest.unwrap().id, 3);
    }

    #[test]
    fn test_falls_back_to_most_recent_of_any_type() {
        let data = vec![
            obs(1, Some(RateType::Penji), 150000, "2024-05-03T10:00:00Z"),
            obs(2, None, 151000, "2024-05-04T10:00:00Z"),
            obs(3, Some(RateType::Penji), 152000, "2024-05-01T10:00:00Z"),
        ];

        let selection = partition_rates(&data, RateType::Sur);
        assert!(selection.filtered.is_empty());
        assert!(selection.is_fallback());
        assert_eq!(selection.latest.unwrap().id, 2);
    }

    #[test]
    fn test_no_fallback_when_type_has_history() {
        let data = vec![
            obs(1, Some(RateType::Sur), 150000, "2024-05-01T10:00:00Z"),
            obs(2, Some(RateType::Penji), 151000, "2024-05-04T10:00:00Z"),
        ];
        let selection = partition_rates(&data, RateType::Sur);
        assert!(!selection.is_fallback());
        assert_eq!(selection.latest.unwrap().id, 1);
    }

    #[test]
    fn test_empty_collection_has_no_latest() {
        let selection = partition_rates(&[], RateType::Penji);
        assert!(selection.filtered.is_empty());
        assert!(selection.latest.is_none());
        assert!(selection.latest_rate().is_none());
        assert!(!selection.is_fallback());
    }

    #[test]
    fn test_unparsable_timestamps_sort_first() {
        let mut data = vec![
            obs(1, Some(RateType::Penji), 100, "2024-05-01T10:00:00Z"),
            obs(2, Some(RateType::Penji), 100, "garbage"),
        ];
        sort_chronologically(&mut data);
        assert_eq!(data[0].id, 2);
        assert_eq!(data[1].id, 1);
    }

    #[test]
    fn test_mixed_timestamp_formats_compare_by_instant() {
        let data = vec![
            // 12:00 Baghdad is 09:00 UTC
            obs(1, Some(RateType::Penji), 100, "2024-05-01T12:00:00"),
            obs(2, Some(RateType::Penji), 200, "2024-05-01T09:30:00Z"),
        ];
        let selection = partition_rates(&data, RateType::Penji);
        assert_eq!(selection.latest.unwrap().id, 2);
    }
}
