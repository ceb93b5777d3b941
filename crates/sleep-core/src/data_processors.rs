use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::InvalidRecord;

// ── StartDateProcessor ────────────────────────────────────────────────────────

/// Resolves the calendar date of a record's `startDate`.
///
/// Only the date matters downstream. Timestamps carrying an offset keep the
/// local date they were written in; no zone conversion happens.
pub struct StartDateProcessor;

impl StartDateProcessor {
    /// Parse a JSON `startDate` value.
    ///
    /// Handles:
    /// * JSON string → RFC 3339 (with `Z` or offset), naive date-time, or
    ///   date-only `YYYY-MM-DD`.
    /// * JSON number → Unix timestamp in milliseconds (UTC).
    pub fn parse(value: &Value) -> Result<NaiveDate, InvalidRecord> {
        match value {
            Value::Null => Err(InvalidRecord::MissingStartDate),
            Value::String(s) => Self::parse_str(s.trim())
                .ok_or_else(|| InvalidRecord::UnparsableStartDate(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(|dt| dt.date_naive())
                .ok_or_else(|| InvalidRecord::UnparsableStartDate(n.to_string())),
            other => Err(InvalidRecord::UnparsableStartDate(other.to_string())),
        }
    }

    fn parse_str(s: &str) -> Option<NaiveDate> {
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.date_naive());
        }

        const DATETIME_FORMATS: &[&str] = &[
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%dT%H:%M",
        ];
        for fmt in DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(naive.date());
            }
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    }
}

// ── UsageExtractor ────────────────────────────────────────────────────────────

/// Reads the `totalUsage` minutes of a record.
pub struct UsageExtractor;

impl UsageExtractor {
    /// Minutes recorded for the session.
    ///
    /// A missing or `null` value counts as `0` (the device was off). Any
    /// other non-number is rejected rather than coerced.
    pub fn minutes(value: Option<&Value>) -> Result<f64, InvalidRecord> {
        match value {
            None | Some(Value::Null) => Ok(0.0),
            Some(Value::Number(n)) => n
                .as_f64()
                .filter(|m| m.is_finite())
                .ok_or_else(|| InvalidRecord::NonNumericDuration(n.to_string())),
            Some(other) => Err(InvalidRecord::NonNumericDuration(other.to_string())),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_rfc3339_zulu() {
        let date = StartDateProcessor::parse(&json!("2025-09-14T22:31:00.000Z")).unwrap();
        assert_eq!(date, ymd(2025, 9, 14));
    }

    #[test]
    fn test_parse_keeps_local_date_of_offset() {
        // 23:30 at -04:00 is already Monday in UTC, but the night is Sunday's.
        let date = StartDateProcessor::parse(&json!("2025-09-14T23:30:00-04:00")).unwrap();
        assert_eq!(date, ymd(2025, 9, 14));
    }

    #[test]
    fn test_parse_naive_datetime() {
        let date = StartDateProcessor::parse(&json!("2025-10-03T21:15:00")).unwrap();
        assert_eq!(date, ymd(2025, 10, 3));
        let date = StartDateProcessor::parse(&json!("2025-10-03 21:15:00.250")).unwrap();
        assert_eq!(date, ymd(2025, 10, 3));
    }

    #[test]
    fn test_parse_date_only() {
        let date = StartDateProcessor::parse(&json!("2025-12-01")).unwrap();
        assert_eq!(date, ymd(2025, 12, 1));
    }

    #[test]
    fn test_parse_epoch_millis() {
        // 2025-09-14T12:00:00Z
        let date = StartDateProcessor::parse(&json!(1_757_851_200_000_i64)).unwrap();
        assert_eq!(date, ymd(2025, 9, 14));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            StartDateProcessor::parse(&json!("last tuesday")),
            Err(InvalidRecord::UnparsableStartDate("last tuesday".to_string()))
        );
        assert!(StartDateProcessor::parse(&json!("")).is_err());
        assert!(StartDateProcessor::parse(&json!(true)).is_err());
        assert_eq!(
            StartDateProcessor::parse(&Value::Null),
            Err(InvalidRecord::MissingStartDate)
        );
    }

    #[test]
    fn test_minutes_numeric() {
        assert_eq!(UsageExtractor::minutes(Some(&json!(480))), Ok(480.0));
        assert_eq!(UsageExtractor::minutes(Some(&json!(412.5))), Ok(412.5));
    }

    #[test]
    fn test_minutes_missing_or_null_is_zero() {
        assert_eq!(UsageExtractor::minutes(None), Ok(0.0));
        assert_eq!(UsageExtractor::minutes(Some(&Value::Null)), Ok(0.0));
    }

    #[test]
    fn test_minutes_rejects_non_numbers() {
        assert!(matches!(
            UsageExtractor::minutes(Some(&json!("480"))),
            Err(InvalidRecord::NonNumericDuration(_))
        ));
        assert!(UsageExtractor::minutes(Some(&json!({"value": 480}))).is_err());
    }
}
