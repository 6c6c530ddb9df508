use crate::constants::{AXIS_PADDING_RATIO, CHART_WINDOW, DEFAULT_AXIS_DOMAIN, FLAT_SERIES_PADDING};
use crate::models::{AxisDomain, ChartPoint, ChartProjection, ExchangeObservation};
use crate::utils::{format_full_date, format_short_date};

/// Project the tail of a sorted series into chart points with axis bounds
pub fn project_chart(filtered: &[ExchangeObservation]) -> ChartProjection {
    let start = filtered.len().saturating_sub(CHART_WINDOW);

    let points: Vec<ChartPoint> = filtered[start..]
        .iter()
        .enumerate()
        .map(|(i, o)| ChartPoint {
            index: i + 1,
            rate: o.rate_per_dollar(),
            timestamp: o.timestamp.clone(),
            full_date: format_full_date(&o.timestamp),
            short_date: format_short_date(&o.timestamp),
            rate_type: o.rate_type,
        })
        .collect();

    let domain = axis_domain(&points);
    ChartProjection { points, domain }
}

/// Y-axis bounds padded around the plotted rates, never below zero
pub fn axis_domain(points: &[ChartPoint]) -> AxisDomain {
    if points.is_empty() {
        return DEFAULT_AXIS_DOMAIN.into();
    }

    let min = points.iter().map(|p| p.rate).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.rate).fold(f64::NEG_INFINITY, f64::max);

    let mut padding = (max - min) * AXIS_PADDING_RATIO;
    if padding == 0.0 {
        padding = FLAT_SERIES_PADDING;
    }

    AxisDomain::new((min - padding).max(0.0), max + padding)
}
