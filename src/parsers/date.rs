use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

/// Offset-less timestamp layouts, read as UTC
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse a machine-readable publication date such as a `<time datetime>` value
///
/// Accepts RFC 3339, ISO 8601 with a `+hhmm` offset, offset-less timestamps
/// (taken as UTC) and bare dates (UTC midnight).
pub fn parse_publication_date(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    let value = value.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Ok(date);
    }
    if let Ok(date) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z") {
        return Ok(date);
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    let day = NaiveDate::parse_from_str(value, "%Y-%m-%d")?;
    Ok(day.and_time(NaiveTime::MIN).and_utc().fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_rfc3339_keeps_offset() {
        let date = parse_publication_date("2023-12-06T10:15:00+02:00").unwrap();
        assert_eq!(date.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(date.hour(), 10);
    }

    #[test]
    fn test_compact_offset() {
        let date = parse_publication_date("2023-12-06T10:15:00+0000").unwrap();
        assert_eq!(date.minute(), 15);
    }

    #[test]
    fn test_naive_and_bare_dates_are_utc() {
        let date = parse_publication_date("2021-05-04T07:08:09").unwrap();
        assert_eq!(date.offset().local_minus_utc(), 0);
        assert_eq!(date.second(), 9);

        let date = parse_publication_date(" 2020-02-29 ").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2020, 2, 29));
        assert_eq!(date.hour(), 0);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(parse_publication_date("last Tuesday").is_err());
        assert!(parse_publication_date("").is_err());
    }
}
