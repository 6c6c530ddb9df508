mod chart;
mod city;
mod observation;
mod rate_type;
mod snapshot;
pub mod theme;

pub use chart::{AxisDomain, ChartPoint, ChartProjection};
pub use city::{City, CITIES};
pub use observation::{scale_rate, ExchangeObservation};
pub use rate_type::RateType;
pub use snapshot::{DerivedRateSnapshot, RateTrend};
pub use theme::{fallback_palettes, ThemeColors, ThemeName, ThemePalette};

/// Observations fetched for one city
pub type RateHistory = Vec<ExchangeObservation>;
