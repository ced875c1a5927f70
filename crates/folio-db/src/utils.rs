//! Shared utility functions

use chrono::{DateTime, SecondsFormat, Utc};

/// Parse a datetime string (RFC3339 format) or return current time
///
/// This helper is used throughout the database layer to handle datetime parsing
/// with a fallback to the current time if parsing fails.
pub fn parse_datetime_or_now(s: &str) -> DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Format a datetime for storage
///
/// Fixed-width microsecond precision keeps stored values lexically ordered,
/// so `ORDER BY created_at` sorts chronologically.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Encode a list of strings as a JSON text column
pub fn encode_list(values: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(values)
}

/// Decode a JSON text column into a list of strings
///
/// Malformed or empty columns decode to an empty list.
pub fn decode_list(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_datetime_or_now() {
        let valid_time = "2024-01-01T12:00:00Z";
        let parsed = parse_datetime_or_now(valid_time);
        assert_eq!(parsed.to_rfc3339(), "2024-01-01T12:00:00+00:00");

        // Invalid time should return current time (just check it doesn't panic)
        let invalid_time = "invalid";
        let now_before = Utc::now();
        let parsed = parse_datetime_or_now(invalid_time);
        let now_after = Utc::now();
        assert!(parsed >= now_before && parsed <= now_after);
    }

    #[test]
    fn test_format_datetime_is_fixed_width() {
        let a = Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap();
        let b = a + chrono::Duration::microseconds(1);
        assert_eq!(format_datetime(&a), "2023-12-01T00:00:00.000000Z");
        assert_eq!(format_datetime(&a).len(), format_datetime(&b).len());
        assert!(format_datetime(&a) < format_datetime(&b));
        assert_eq!(parse_datetime_or_now(&format_datetime(&b)), b);
    }

    #[test]
    fn test_list_columns() {
        let techs = vec!["Rust".to_string(), "SQLite".to_string()];
        let encoded = encode_list(&techs).unwrap();
        assert_eq!(encoded, r#"["Rust","SQLite"]"#);
        assert_eq!(decode_list(&encoded), techs);
        assert!(decode_list("not json").is_empty());
        assert!(decode_list("").is_empty());
    }
}
