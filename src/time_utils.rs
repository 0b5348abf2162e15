use chrono::{DateTime, NaiveDate, Utc};

/// Parses an RFC 3339 timestamp, or a bare `YYYY-MM-DD` date as midnight UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Elapsed days between two timestamps, `None` if either cannot be parsed.
#[allow(clippy::cast_precision_loss)]
pub fn days_between(start: &str, end: &str) -> Option<f64> {
    let start = parse_timestamp(start)?;
    let end = parse_timestamp(end)?;
    Some((end - start).num_milliseconds() as f64 / 86_400_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse_timestamp("2026-02-07T10:00:00+02:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-02-07T08:00:00+00:00");
    }

    #[test]
    fn test_parse_bare_date() {
        let parsed = parse_timestamp("2026-02-07").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-02-07T00:00:00+00:00");
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert!(parse_timestamp("February 7th").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_days_between() {
        assert_eq!(
            days_between("2026-02-01T00:00:00Z", "2026-02-03T12:00:00Z"),
            Some(2.5)
        );
        assert_eq!(days_between("bad", "2026-02-03T12:00:00Z"), None);
    }
}
