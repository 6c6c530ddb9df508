//! USD ⇄ IQD converter.
//!
//! Two free-text amount fields kept consistent under the latest selected rate.
//! Whichever field the user edited last drives the other one.

use serde::Serialize;

/// Which field currently drives the other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConverterMode {
    Empty,
    UsdDriven,
    IqdDriven,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyConverter {
    usd: String,
    iqd: String,
    mode: ConverterMode,
    /// IQD per USD
    rate: Option<f64>,
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        Self::new(None)
    }
}

impl CurrencyConverter {
    pub fn new(rate: Option<f64>) -> Self {
        Self {
            usd: String::new(),
            iqd: String::new(),
            mode: ConverterMode::Empty,
            rate: usable_rate(rate),
        }
    }

    pub fn usd(&self) -> &str {
        &self.usd
    }

    pub fn iqd(&self) -> &str {
        &self.iqd
    }

    pub fn mode(&self) -> ConverterMode {
        self.mode
    }

    pub fn rate(&self) -> Option<f64> {
        self.rate
    }

    /// User typed into the USD field
    pub fn edit_usd(&mut self, value: &str) {
        self.usd = value.to_string();
        self.mode = if value.is_empty() {
            ConverterMode::Empty
        } else {
            ConverterMode::UsdDriven
        };
        self.iqd = match (value.is_empty(), self.rate) {
            (false, Some(rate)) => usd_to_iqd(parse_amount(value), rate),
            _ => String::new(),
        };
    }

    /// User typed into the IQD field
    pub fn edit_iqd(&mut self, value: &str) {
        self.iqd = value.to_string();
        self.mode = if value.is_empty() {
            ConverterMode::Empty
        } else {
            ConverterMode::IqdDriven
        };
        self.usd = match (value.is_empty(), self.rate) {
            (false, Some(rate)) => iqd_to_usd(parse_amount(value), rate),
            _ => String::new(),
        };
    }

    /// Latest rate changed; losing the rate clears both fields
    pub fn set_rate(&mut self, rate: Option<f64>) {
        self.rate = usable_rate(rate);

        if self.rate.is_none() {
            self.reset();
            return;
        }

        match self.mode {
            ConverterMode::UsdDriven => {
                let usd = self.usd.clone();
                self.edit_usd(&usd);
            }
            ConverterMode::IqdDriven => {
                let iqd = self.iqd.clone();
                self.edit_iqd(&iqd);
            }
            ConverterMode::Empty => {}
        }
    }

    pub fn reset(&mut self) {
        self.usd.clear();
        self.iqd.clear();
        self.mode = ConverterMode::Empty;
    }
}

fn usable_rate(rate: Option<f64>) -> Option<f64> {
    rate.filter(|r| r.is_finite() && *r > 0.0)
}

/// Whole dinars for a dollar amount
pub fn usd_to_iqd(usd: f64, rate: f64) -> String {
    format!("{:.0}", (usd * rate).round())
}

/// Dollars, two decimals, for a dinar amount
pub fn iqd_to_usd(iqd: f64, rate: f64) -> String {
    format!("{:.2}", ((iqd / rate) * 100.0).round() / 100.0)
}

/// Parse the leading decimal number of a user-typed amount, 0 when there is none
pub fn parse_amount(input: &str) -> f64 {
    let s = input.trim();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return 0.0;
    }

    // Optional exponent, only taken when complete
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100"), 100.0);
        assert_eq!(parse_amount(" 12.5 "), 12.5);
        assert_eq!(parse_amount("12abc"), 12.0);
        assert_eq!(parse_amount(".5"), 0.5);
        assert_eq!(parse_amount("5."), 5.0);
        assert_eq!(parse_amount("-3"), -3.0);
        assert_eq!(parse_amount("1e3"), 1000.0);
        assert_eq!(parse_amount("2e"), 2.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("."), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
        assert_eq!(parse_amount("1e999"), 0.0);
    }

    #[test]
    fn test_usd_drives_iqd() {
        let mut converter = CurrencyConverter::new(Some(1520.0));
        converter.edit_usd("100");
        assert_eq!(converter.iqd(), "152000");
        assert_eq!(converter.mode(), ConverterMode::UsdDriven);

        converter.edit_usd("0.333");
        assert_eq!(converter.iqd(), "506");
    }

    #[test]
    fn test_iqd_drives_usd() {
        let mut converter = CurrencyConverter::new(Some(1520.0));
        converter.edit_iqd("100000");
        assert_eq!(converter.usd(), "65.79");
        assert_eq!(converter.mode(), ConverterMode::IqdDriven);
    }

    #[test]
    fn test_clearing_a_field_clears_the_other() {
        let mut converter = CurrencyConverter::new(Some(1520.0));
        converter.edit_usd("10");
        converter.edit_usd("");
        assert_eq!(converter.iqd(), "");
        assert_eq!(converter.mode(), ConverterMode::Empty);

        converter.edit_iqd("1520");
        converter.edit_iqd("");
        assert_eq!(converter.usd(), "");
    }

    #[test]
    fn test_non_numeric_input_counts_as_zero() {
        let mut converter = CurrencyConverter::new(Some(1520.0));
        converter.edit_usd("abc");
        assert_eq!(converter.usd(), "abc");
        assert_eq!(converter.iqd(), "0");

        converter.edit_iqd("xyz");
        assert_eq!(converter.usd(), "0.00");
    }

    #[test]
    fn test_without_rate_derived_field_stays_empty() {
        let mut converter = CurrencyConverter::new(None);
        converter.edit_usd("10");
        assert_eq!(converter.usd(), "10");
        assert_eq!(converter.iqd(), "");
    }

    #[test]
    fn test_losing_rate_resets_both_fields() {
        let mut converter = CurrencyConverter::new(Some(1520.0));
        converter.edit_usd("10");
        converter.set_rate(None);
        assert_eq!(converter.usd(), "");
        assert_eq!(converter.iqd(), "");
        assert_eq!(converter.mode(), ConverterMode::Empty);
    }

    #[test]
    fn test_zero_rate_is_treated_as_missing() {
        let mut converter = CurrencyConverter::new(Some(1520.0));
        converter.edit_iqd("1520");
        converter.set_rate(Some(0.0));
        assert_eq!(converter.rate(), None);
        assert_eq!(converter.usd(), "");
        assert_eq!(converter.iqd(), "");
    }

    #[test]
    fn test_new_rate_recomputes_derived_field() {
        let mut converter = CurrencyConverter::new(Some(1500.0));
        converter.edit_usd("10");
        assert_eq!(converter.iqd(), "15000");

        converter.set_rate(Some(1520.0));
        assert_eq!(converter.usd(), "10");
        assert_eq!(converter.iqd(), "15200");

        converter.edit_iqd("30400");
        converter.set_rate(Some(1500.0));
        assert_eq!(converter.iqd(), "30400");
        assert_eq!(converter.usd(), "20.27");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(usd_to_iqd(0.5, 1.0), "1");
        assert_eq!(usd_to_iqd(2.5, 1.0), "3");
        assert_eq!(iqd_to_usd(5.0, 1000.0), "0.01");
    }
}
