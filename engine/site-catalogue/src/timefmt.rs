//! UTMC-style timestamp parsing and formatting.

use chrono::{DateTime, Utc};

/// Fractional-seconds ISO format with explicit UTC offset, as carried by
/// the raw catalogue (`2025-05-19T00:00:00.000+0000`). Parsing also
/// accepts a colon in the offset and a missing fraction.
pub const UTMC_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Wire form used when writing catalogue artifacts: the fraction is always
/// present with millisecond width.
pub const UTMC_TIMESTAMP_WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Parse an absolute UTMC timestamp into UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_str(s, UTMC_TIMESTAMP_FORMAT).map(|ts| ts.with_timezone(&Utc))
}

/// Format a timestamp in the UTMC wire form.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(UTMC_TIMESTAMP_WRITE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_fractional_seconds_and_offset() {
        let ts = parse_timestamp("2025-05-19T00:10:00.000+0000").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 5, 19, 0, 10, 0).unwrap());
    }

    #[test]
    fn parses_offset_with_colon_and_no_fraction() {
        let ts = parse_timestamp("2025-05-19T18:30:00+00:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 5, 19, 18, 30, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("not a timestamp").is_err());
        assert!(parse_timestamp("2025-05-19 00:10:00").is_err());
    }

    #[test]
    fn round_trips_through_wire_form() {
        let ts = Utc.with_ymd_and_hms(2025, 5, 19, 8, 0, 0).unwrap();
        let wire = format_timestamp(&ts);
        assert_eq!(wire, "2025-05-19T08:00:00.000+0000");
        assert_eq!(parse_timestamp(&wire).unwrap(), ts);
    }
}
