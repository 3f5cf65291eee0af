//! Tolerant deserializers for loosely typed client payloads

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC)
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// `#[serde(deserialize_with = "lenient::timestamp")]`
pub fn timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {:?}", raw)))
}

/// A non-negative count sent as a number or numeric string.
///
/// Unparsable values become `Some(0)`, matching how storefront forms treat
/// an empty quantity box.
pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(n.as_f64().map_or(0, clamp_count)),
        Some(Value::String(s)) => Some(s.trim().parse::<f64>().map_or(0, clamp_count)),
        Some(_) => Some(0),
    })
}

fn clamp_count(n: f64) -> u32 {
    if n.is_finite() && n > 0.0 {
        n.trunc().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Stock {
        #[serde(default, deserialize_with = "count")]
        qty: Option<u32>,
    }

    #[test]
    fn test_parse_timestamp() {
        let date = parse_timestamp("2020-03-15").unwrap();
        assert_eq!(date.to_rfc3339(), "2020-03-15T00:00:00+00:00");

        let full = parse_timestamp("2024-05-01T12:30:00Z").unwrap();
        assert_eq!(full.to_rfc3339(), "2024-05-01T12:30:00+00:00");

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_count() {
        let s: Stock = serde_json::from_str(r#"{"qty": "7"}"#).unwrap();
        assert_eq!(s.qty, Some(7));
        let s: Stock = serde_json::from_str(r#"{"qty": 3.9}"#).unwrap();
        assert_eq!(s.qty, Some(3));
        let s: Stock = serde_json::from_str(r#"{"qty": "lots"}"#).unwrap();
        assert_eq!(s.qty, Some(0));
        let s: Stock = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(s.qty, None);
    }
}
