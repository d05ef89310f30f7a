//! Lenient timestamp parsing for request bodies.
//!
//! Clients send expiry either with an offset (`2030-01-01T00:00:00Z`,
//! `2030-01-01T02:00:00+02:00`) or without one (`2030-01-01T00:00:00`).
//! Timestamps without an offset are taken as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Parses an RFC 3339 timestamp, falling back to a naive ISO 8601 one in UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| value.parse::<NaiveDateTime>().map(|naive| naive.and_utc()))
        .ok()
}

/// `deserialize_with` helper for `Option<DateTime<Utc>>` fields.
///
/// Absent and `null` both yield `None`.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_timestamp(&raw).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid timestamp '{raw}', expected ISO 8601"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_offset_timestamps() {
        let expected = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2030-01-01T00:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2030-01-01T02:00:00+02:00"), Some(expected));
    }

    #[test]
    fn test_naive_timestamp_is_utc() {
        let expected = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2030-01-01T00:00:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2030-01-01T00:00:00.250"),
            Some(expected + chrono::Duration::milliseconds(250))
        );
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(parse_timestamp("tomorrow"), None);
        assert_eq!(parse_timestamp("2030-01-01"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
