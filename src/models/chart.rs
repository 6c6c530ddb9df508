use super::RateType;
use serde::{Deserialize, Serialize};

/// Display projection of one observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// 1-based position inside the chart window
    pub index: usize,
    /// IQD per USD
    pub rate: f64,
    pub timestamp: String,
    /// `dd/mm/yyyy, HH:MM`
    pub full_date: String,
    /// `dd/mm`
    pub short_date: String,
    #[serde(rename = "type")]
    pub rate_type: Option<RateType>,
}

/// Y-axis bounds for the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDomain {
    pub lower: f64,
    pub upper: f64,
}

impl AxisDomain {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }
}

impl From<(f64, f64)> for AxisDomain {
    fn from((lower, upper): (f64, f64)) -> Self {
        Self { lower, upper }
    }
}

/// Chart-ready window over a partitioned series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartProjection {
    pub points: Vec<ChartPoint>,
    pub domain: AxisDomain,
}

impl ChartProjection {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
