//! Timestamp parsing and chart date rendering.
//!
//! Observations carry ISO-8601 strings. Timestamps with an offset are taken as
//! is; naive ones are read as wall-clock time in the dashboard timezone.

use crate::constants::DASHBOARD_TIMEZONE;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

fn dashboard_tz() -> Tz {
    DASHBOARD_TIMEZONE.parse().unwrap_or_else(|e| {
        tracing::warn!("Failed to parse timezone '{}': {}", DASHBOARD_TIMEZONE, e);
        Tz::UTC
    })
}

/// Parse an observation timestamp, `None` when it is not a recognisable ISO-8601 value
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let tz = dashboard_tz();
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }

    // Date-only ISO strings are UTC midnight
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Long chart label, `dd/mm/yyyy, HH:MM` in the dashboard timezone
pub fn format_full_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.with_timezone(&dashboard_tz()).format("%d/%m/%Y, %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// Short chart label, `dd/mm` in the dashboard timezone
pub fn format_short_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.with_timezone(&dashboard_tz()).format("%d/%m").to_string(),
        None => raw.to_string(),
    }
}
