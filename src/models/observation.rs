use super::rate_type::{deserialize_lenient, RateType};
use crate::constants::RATE_SCALE;
use crate::utils::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One exchange-rate observation as published by the rate service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeObservation {
    pub id: i64,
    pub city: String,
    /// `None` when the service sent a denomination this dashboard does not know
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub rate_type: Option<RateType>,
    /// IQD per USD scaled by 100
    pub rate: i64,
    /// ISO-8601 observation time
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,
}

impl ExchangeObservation {
    /// Observation time, `None` if the timestamp cannot be parsed
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    /// Rate in IQD per USD
    pub fn rate_per_dollar(&self) -> f64 {
        scale_rate(self.rate)
    }

    pub fn is_type(&self, rate_type: RateType) -> bool {
        self.rate_type == Some(rate_type)
    }
}

/// Convert a stored (×100) rate to IQD per USD
pub fn scale_rate(raw: i64) -> f64 {
    raw as f64 / RATE_SCALE
}
