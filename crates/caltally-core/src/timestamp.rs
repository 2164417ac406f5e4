//! Parsing of iCalendar DATE and DATE-TIME values into local wall-clock time.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";
const DATE_FORMAT: &str = "%Y%m%d";

/// Parse an iCalendar `DATE` or `DATE-TIME` value.
///
/// - `20240115` is midnight of that date
/// - `20240115T090000` is floating wall-clock time, taken as is
/// - `20240115T090000Z` is UTC and is converted to the machine's local time
///
/// Returns `None` for anything else.
pub fn parse_ics_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Some(utc) = value.strip_suffix('Z').or_else(|| value.strip_suffix('z')) {
        let naive = NaiveDateTime::parse_from_str(utc, DATE_TIME_FORMAT).ok()?;
        return Some(utc_to_local(naive));
    }
    if value.len() == 8 {
        return NaiveDate::parse_from_str(value, DATE_FORMAT)
            .ok()
            .map(|d| d.and_time(NaiveTime::MIN));
    }
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT).ok()
}

/// Whether a value is a bare `DATE` (no time part).
pub fn is_date_only(value: &str) -> bool {
    let value = value.trim();
    value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit())
}

fn utc_to_local(naive: NaiveDateTime) -> NaiveDateTime {
    chrono::Utc
        .from_utc_datetime(&naive)
        .with_timezone(&Local)
        .naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_floating_date_time() {
        let ts = parse_ics_timestamp("20240115T093000").unwrap();
        assert_eq!(ts.to_string(), "2024-01-15 09:30:00");
    }

    #[test]
    fn parses_date_as_midnight() {
        let ts = parse_ics_timestamp("20240229").unwrap();
        assert_eq!(ts.to_string(), "2024-02-29 00:00:00");
        assert!(is_date_only("20240229"));
        assert!(!is_date_only("20240229T000000"));
    }

    #[test]
    fn utc_values_become_local() {
        let expected = utc_to_local(
            NaiveDateTime::parse_from_str("20240115T120000", DATE_TIME_FORMAT).unwrap(),
        );
        assert_eq!(parse_ics_timestamp("20240115T120000Z"), Some(expected));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_ics_timestamp("").is_none());
        assert!(parse_ics_timestamp("tomorrow").is_none());
        assert!(parse_ics_timestamp("20241301").is_none());
    }
}
