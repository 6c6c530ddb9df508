/// Banknote denomination a rate is quoted for
///
/// The two denominations trade at slightly different rates in Iraqi markets.
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateType {
    /// 5,000 dinar note (default)
    Penji,

    /// 25,000 dinar note
    Sur,
}

impl Default for RateType {
    fn default() -> Self {
        RateType::Penji
    }
}

impl RateType {
    /// Parse from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "penji" => Ok(RateType::Penji),
            "sur" => Ok(RateType::Sur),
            _ => Err(format!("Invalid rate type: '{}'. Valid values: penji, sur", s)),
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RateType::Penji => "penji",
            RateType::Sur => "sur",
        }
    }

    /// Face value of the note in dinars
    pub fn note_value(&self) -> u32 {
        match self {
            RateType::Penji => 5_000,
            RateType::Sur => 25_000,
        }
    }
}

impl fmt::Display for RateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Deserialize a wire `rate_type`, mapping unknown or missing values to `None`
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<RateType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| match s {
            "penji" => Some(RateType::Penji),
            "sur" => Some(RateType::Sur),
            _ => None,
        }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_type_default() {
        assert_eq!(RateType::default(), RateType::Penji);
    }

    #[test]
    fn test_rate_type_from_str() {
        assert_eq!(RateType::from_str("penji").unwrap(), RateType::Penji);
        assert_eq!(RateType::from_str("SUR").unwrap(), RateType::Sur);
        assert!(RateType::from_str("dollar").is_err());
    }

    #[test]
    fn test_rate_type_serialize() {
        assert_eq!(serde_json::to_string(&RateType::Sur).unwrap(), r#""sur""#);
        let penji: RateType = serde_json::from_str(r#""penji""#).unwrap();
        assert_eq!(penji, RateType::Penji);
    }

    #[test]
    fn test_note_value() {
        assert_eq!(RateType::Penji.note_value(), 5_000);
        assert_eq!(RateType::Sur.note_value(), 25_000);
    }
}
