//! Timestamp parsing for inbound readings.
//!
//! Readings arrive with ISO-8601 strings. An offset, when present, is
//! discarded after conversion so that every comparison happens on the
//! wall-clock time the device reported (daily check-ins are matched on
//! local `HH:MM`).

use chrono::{DateTime, NaiveDateTime};

/// Naive formats accepted after RFC 3339 fails. `%.f` also matches an
/// absent fractional part.
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Errors produced while reading a timestamp field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    /// The field was absent or blank.
    #[error("missing required field `{field}`")]
    Missing {
        /// Name of the field.
        field: &'static str,
    },

    /// The field was present but not a recognisable ISO-8601 timestamp.
    #[error("invalid timestamp in `{field}`: {value:?}")]
    Invalid {
        /// Name of the field.
        field: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },
}

/// Parse an ISO-8601 timestamp string into a wall-clock date-time.
///
/// `field` names the input field for error messages.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<NaiveDateTime, TimestampError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TimestampError::Missing { field });
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| TimestampError::Invalid {
            field,
            value: trimmed.to_owned(),
        })
}

/// Render the `HH:MM` wall-clock portion of a timestamp.
pub fn clock_hhmm(at: NaiveDateTime) -> String {
    at.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    #[test]
    fn parses_naive_iso() {
        let ts = parse_timestamp("timestamp", "2024-03-01T08:15:30");
        assert!(ts.is_ok());
        assert_eq!(ts.map(|t| t.minute()).ok(), Some(15));
    }

    #[test]
    fn parses_fractional_seconds_and_space_separator() {
        assert!(parse_timestamp("timestamp", "2024-03-01T08:15:30.250").is_ok());
        assert!(parse_timestamp("timestamp", "2024-03-01 08:15:30").is_ok());
        assert!(parse_timestamp("timestamp", "2024-03-01T08:15").is_ok());
    }

    #[test]
    fn offset_keeps_wall_clock_time() {
        let ts = parse_timestamp("timestamp", "2024-03-01T08:00:00+05:00");
        assert_eq!(ts.map(clock_hhmm).ok().as_deref(), Some("08:00"));
    }

    #[test]
    fn blank_is_missing() {
        assert_eq!(
            parse_timestamp("timestamp", "  "),
            Err(TimestampError::Missing { field: "timestamp" })
        );
    }

    #[test]
    fn garbage_is_invalid() {
        let err = parse_timestamp("current_time", "yesterday");
        assert!(matches!(
            err,
            Err(TimestampError::Invalid { field: "current_time", .. })
        ));
    }
}
