//! Cross-type comparable keys for field sorting.
//!
//! One sort control handles numeric ids, dates and free text without any
//! per-field type declaration. Keys of different kinds order as
//! `Numeric < Temporal < Text`.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use super::value_access::string_form;

/// Comparable representation of a field value
#[derive(Debug, Clone)]
pub enum SortKey {
    Numeric(f64),
    /// Milliseconds since the Unix epoch
    Temporal(i64),
    /// Lowercased string form
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Numeric(_) => 0,
            SortKey::Temporal(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Numeric(a), SortKey::Numeric(b)) => a.total_cmp(b),
            (SortKey::Temporal(a), SortKey::Temporal(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Normalize a raw value: absent/null -> empty text, then number, then date, then lowercased text
pub fn normalize(value: Option<&Value>) -> SortKey {
    let text = match value {
        None | Some(Value::Null) => return SortKey::Text(String::new()),
        Some(Value::Bool(b)) => return SortKey::Numeric(if *b { 1.0 } else { 0.0 }),
        Some(Value::Number(n)) => {
            if let Some(f) = n.as_f64().filter(|f| f.is_finite()) {
                return SortKey::Numeric(f);
            }
            n.to_string()
        }
        other => string_form(other).unwrap_or_default(),
    };

    if let Some(number) = parse_number(&text) {
        return SortKey::Numeric(number);
    }
    if let Some(millis) = parse_timestamp(&text) {
        return SortKey::Temporal(millis);
    }
    SortKey::Text(text.to_lowercase())
}

/// Finite number from a trimmed string; empty input is not a number
fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    // f64::from_str accepts "inf" and "NaN"
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Epoch milliseconds for recognizable date/time text. Naive forms are read as UTC.
pub fn parse_timestamp(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.timestamp_millis());
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    for format in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp_millis());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_order() {
        assert_eq!(normalize(None), SortKey::Text(String::new()));
        assert_eq!(normalize(Some(&json!(null))), SortKey::Text(String::new()));
        assert_eq!(normalize(Some(&json!(10))), SortKey::Numeric(10.0));
        assert_eq!(normalize(Some(&json!(" 2.5 "))), SortKey::Numeric(2.5));
        assert_eq!(normalize(Some(&json!(true))), SortKey::Numeric(1.0));
        assert_eq!(
            normalize(Some(&json!("1970-01-02"))),
            SortKey::Temporal(86_400_000)
        );
        assert_eq!(
            normalize(Some(&json!("Hello World"))),
            SortKey::Text("hello world".to_string())
        );
    }

    #[test]
    fn test_non_finite_and_empty_strings_are_text() {
        assert_eq!(normalize(Some(&json!("NaN"))), SortKey::Text("nan".to_string()));
        assert_eq!(normalize(Some(&json!("inf"))), SortKey::Text("inf".to_string()));
        assert_eq!(normalize(Some(&json!(""))), SortKey::Text(String::new()));
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = 1_700_000_000_000i64;
        assert_eq!(parse_timestamp("2023-11-14T22:13:20Z"), Some(expected));
        assert_eq!(parse_timestamp("2023-11-14T23:13:20+01:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-11-14 22:13:20"), Some(expected));
        assert_eq!(parse_timestamp("Tue, 14 Nov 2023 22:13:20 +0000"), Some(expected));
        assert_eq!(parse_timestamp("2023/11/14"), parse_timestamp("2023-11-14"));
        assert_eq!(parse_timestamp("not a date"), None);
    }

    #[test]
    fn test_numbers_order_numerically() {
        let mut keys = vec![
            normalize(Some(&json!("10"))),
            normalize(Some(&json!("2"))),
            normalize(Some(&json!("abc"))),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                SortKey::Numeric(2.0),
                SortKey::Numeric(10.0),
                SortKey::Text("abc".to_string())
            ]
        );
    }

    #[test]
    fn test_cross_kind_ordering() {
        let number = SortKey::Numeric(1e12);
        let date = SortKey::Temporal(0);
        let text = SortKey::Text(String::new());
        assert!(number < date);
        assert!(date < text);
        assert!(number < text);
    }

    #[test]
    fn test_equality_agrees_with_ordering() {
        let zero = SortKey::Numeric(0.0);
        let negative_zero = SortKey::Numeric(-0.0);
        assert_ne!(zero.cmp(&negative_zero), Ordering::Equal);
        assert_ne!(zero, negative_zero);

        let nan = SortKey::Numeric(f64::NAN);
        assert_eq!(nan, nan.clone());
        assert_eq!(SortKey::Temporal(5), SortKey::Temporal(5));
        assert_ne!(SortKey::Temporal(5), SortKey::Text("5".to_string()));
    }
}
