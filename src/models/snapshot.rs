use serde::{Deserialize, Serialize};

/// Latest rate of one denomination together with its change since the previous observation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedRateSnapshot {
    pub current_rate: f64,
    pub rate_change: f64,
    pub rate_change_percent: f64,
}

/// Direction of the latest move, as shown on the rate card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateTrend {
    Up,
    Down,
    Flat,
}

impl DerivedRateSnapshot {
    pub fn trend(&self) -> RateTrend {
        if self.rate_change > 0.0 {
            RateTrend::Up
        } else if self.rate_change < 0.0 {
            RateTrend::Down
        } else {
            RateTrend::Flat
        }
    }
}
