//! Forgiving deserializers for dashboard input
//!
//! Data arrives from form fields and local storage, where numbers are
//! sometimes strings, sometimes `null`, and dates are sometimes garbage.
//! None of that is allowed to fail a projection: numbers degrade to `0`,
//! unreadable dates degrade to "absent".

use jiff::civil::Date;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer};

/// Replace NaN and infinities with `0`.
#[inline]
pub fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl NumberLike {
    fn to_f64(&self) -> Option<f64> {
        match self {
            NumberLike::Number(n) => Some(*n).filter(|n| n.is_finite()),
            NumberLike::Text(s) => s
                .trim()
                .replace(',', "")
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite()),
            NumberLike::Flag(_) => None,
        }
    }
}

/// A number that never fails to deserialize.
///
/// Used as the value type for maps whose values should follow the same
/// rules as [`number`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Lenient(pub f64);

impl<'de> Deserialize<'de> for Lenient {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        number(deserializer).map(Lenient)
    }
}

/// Deserialize a number, treating `null`, booleans, and unparseable text as `0`.
pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = Option::<NumberLike>::deserialize(deserializer)?;
    Ok(raw.and_then(|n| n.to_f64()).unwrap_or(0.0))
}

/// Deserialize an optional number; unreadable values become `None`.
pub fn optional_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    let raw = Option::<NumberLike>::deserialize(deserializer)?;
    Ok(raw.and_then(|n| n.to_f64()))
}

/// Deserialize an optional whole count (floored, negatives clamp to 0).
pub fn optional_count<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u32>, D::Error> {
    Ok(optional_number(deserializer)?.map(|n| n.floor().clamp(0.0, u32::MAX as f64) as u32))
}

/// Deserialize a string-keyed map of numbers with [`number`] semantics per value.
pub fn number_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<FxHashMap<String, f64>, D::Error> {
    let raw = Option::<FxHashMap<String, Lenient>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, v.0))
        .collect())
}

/// Parse a date from the formats the dashboard has been seen to store:
/// a civil date, a civil datetime, or an RFC 3339 timestamp.
pub fn parse_date(text: &str) -> Option<Date> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(date) = text.parse::<Date>() {
        return Some(date);
    }
    if let Ok(dt) = text.parse::<jiff::civil::DateTime>() {
        return Some(dt.date());
    }
    if let Ok(ts) = text.parse::<jiff::Timestamp>() {
        return Some(ts.to_zoned(jiff::tz::TimeZone::UTC).date());
    }
    None
}

/// Deserialize an optional date; anything unparseable becomes `None`.
pub fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Date>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|text| {
        let parsed = parse_date(&text);
        if parsed.is_none() && !text.trim().is_empty() {
            tracing::warn!(value = %text, "Ignoring unreadable date");
        }
        parsed
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date as civil;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "number")]
        amount: f64,
        #[serde(default, deserialize_with = "optional_number")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "date")]
        when: Option<Date>,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_number_accepts_text_and_null() {
        assert_eq!(probe(r#"{"amount": "1,250.5"}"#).amount, 1250.5);
        assert_eq!(probe(r#"{"amount": null}"#).amount, 0.0);
        assert_eq!(probe(r#"{"amount": "abc"}"#).amount, 0.0);
        assert_eq!(probe(r#"{"amount": true}"#).amount, 0.0);
        assert_eq!(probe(r#"{}"#).amount, 0.0);
    }

    #[test]
    fn test_optional_number() {
        assert_eq!(probe(r#"{"price": 12}"#).price, Some(12.0));
        assert_eq!(probe(r#"{"price": ""}"#).price, None);
        assert_eq!(probe(r#"{}"#).price, None);
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(probe(r#"{"when": "2027-03-01"}"#).when, Some(civil(2027, 3, 1)));
        assert_eq!(
            probe(r#"{"when": "2027-03-01T10:30:00"}"#).when,
            Some(civil(2027, 3, 1))
        );
        assert_eq!(
            probe(r#"{"when": "2027-03-01T23:30:00Z"}"#).when,
            Some(civil(2027, 3, 1))
        );
        assert_eq!(probe(r#"{"when": "Invalid Date"}"#).when, None);
        assert_eq!(probe(r#"{"when": null}"#).when, None);
    }

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
        assert_eq!(finite_or_zero(-3.5), -3.5);
    }
}
