//! ICS/iCalendar parsing into [`BaseEvent`]s using the `ical` crate.

use std::io::BufReader;

use ical::parser::ical::component::IcalEvent;
use tracing::{debug, warn};

use crate::error::{CoreError, Result};
use crate::model::BaseEvent;
use crate::recurrence::RecurrenceRule;
use crate::timestamp::parse_ics_timestamp;

/// Parse every `VEVENT` of every `VCALENDAR` in `text`.
///
/// Cancelled events are skipped. Missing or unreadable `DTSTART`/`DTEND`
/// values are left empty for the expander to reject.
///
/// # Errors
///
/// Returns [`CoreError::Parse`] when the stream is not valid iCalendar and
/// [`CoreError::InvalidRule`] for an unreadable `RRULE`.
pub fn parse_calendar(text: &str) -> Result<Vec<BaseEvent>> {
    let reader = ical::IcalParser::new(BufReader::new(text.as_bytes()));
    let mut events = Vec::new();

    for calendar in reader {
        let calendar = calendar.map_err(|e| CoreError::Parse(e.to_string()))?;
        for event in &calendar.events {
            if let Some(base) = parse_event(event)? {
                events.push(base);
            }
        }
    }

    debug!(events = events.len(), "parsed calendar feed");
    Ok(events)
}

fn parse_event(event: &IcalEvent) -> Result<Option<BaseEvent>> {
    let mut base = BaseEvent::default();
    let mut rrule: Option<String> = None;
    let mut cancelled = false;

    for property in &event.properties {
        let value = property.value.as_deref();
        match property.name.as_str() {
            "SUMMARY" => base.title = value.map(unescape_text).unwrap_or_default(),
            "DTSTART" => base.start = value.and_then(|v| timestamp(v, "DTSTART")),
            "DTEND" => base.end = value.and_then(|v| timestamp(v, "DTEND")),
            "RRULE" => rrule = value.map(str::to_string),
            "STATUS" => cancelled = value.is_some_and(|v| v.eq_ignore_ascii_case("CANCELLED")),
            _ => {}
        }
    }

    if cancelled {
        debug!(title = %base.title, "skipping cancelled event");
        return Ok(None);
    }

    if let Some(raw) = rrule {
        base.rule = Some(raw.parse::<RecurrenceRule>()?);
    }
    Ok(Some(base))
}

fn timestamp(value: &str, field: &str) -> Option<chrono::NaiveDateTime> {
    let parsed = parse_ics_timestamp(value);
    if parsed.is_none() {
        warn!(field, value, "unreadable timestamp");
    }
    parsed
}

/// Undo RFC 5545 TEXT escaping.
fn unescape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::Frequency;
    use indoc::indoc;

    const FEED: &str = indoc! {"
        BEGIN:VCALENDAR
        VERSION:2.0
        PRODID:-//caltally//test//EN
        BEGIN:VEVENT
        UID:1
        SUMMARY:Team Standup
        DTSTART;TZID=Europe/Berlin:20240102T091500
        DTEND;TZID=Europe/Berlin:20240102T093000
        RRULE:FREQ=WEEKLY;BYDAY=TU,TH;WKST=SU
        END:VEVENT
        BEGIN:VEVENT
        UID:2
        SUMMARY:Lunch\\, with Sam
        DTSTART;VALUE=DATE:20240103
        DTEND;VALUE=DATE:20240104
        END:VEVENT
        BEGIN:VEVENT
        UID:3
        SUMMARY:Called off
        STATUS:CANCELLED
        DTSTART:20240104T100000
        DTEND:20240104T110000
        END:VEVENT
        END:VCALENDAR
    "};

    #[test]
    fn parses_events_and_rules() {
        let events = parse_calendar(FEED).unwrap();
        assert_eq!(events.len(), 2);

        let standup = &events[0];
        assert_eq!(standup.title, "Team Standup");
        assert_eq!(standup.start.unwrap().to_string(), "2024-01-02 09:15:00");
        assert_eq!(standup.end.unwrap().to_string(), "2024-01-02 09:30:00");
        let rule = standup.rule.as_ref().unwrap();
        assert_eq!(rule.frequency, Frequency::Weekly);
        assert_eq!(rule.by_day.len(), 2);

        let lunch = &events[1];
        assert_eq!(lunch.title, "Lunch, with Sam");
        assert_eq!(lunch.start.unwrap().to_string(), "2024-01-03 00:00:00");
        assert!(lunch.rule.is_none());
    }

    #[test]
    fn missing_end_is_kept_for_the_expander() {
        let feed = indoc! {"
            BEGIN:VCALENDAR
            BEGIN:VEVENT
            SUMMARY:Open ended
            DTSTART:20240102T090000
            END:VEVENT
            END:VCALENDAR
        "};
        let events = parse_calendar(feed).unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].start.is_some());
        assert!(events[0].end.is_none());
    }

    #[test]
    fn bad_rule_is_an_error() {
        let feed = indoc! {"
            BEGIN:VCALENDAR
            BEGIN:VEVENT
            SUMMARY:Weird
            DTSTART:20240102T090000
            DTEND:20240102T100000
            RRULE:INTERVAL=2
            END:VEVENT
            END:VCALENDAR
        "};
        assert!(matches!(parse_calendar(feed), Err(CoreError::InvalidRule { .. })));
    }

    #[test]
    fn cancelled_event_is_skipped_before_its_rule_is_read() {
        let feed = indoc! {"
            BEGIN:VCALENDAR
            BEGIN:VEVENT
            STATUS:CANCELLED
            SUMMARY:Offsite
            DTSTART:20240104T100000
            DTEND:20240104T110000
            RRULE:FREQ=FORTNIGHTLY
            END:VEVENT
            BEGIN:VEVENT
            SUMMARY:Review
            DTSTART:20240105T100000
            DTEND:20240105T110000
            STATUS:CONFIRMED
            END:VEVENT
            END:VCALENDAR
        "};
        let events = parse_calendar(feed).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Review");
    }

    #[test]
    fn unescapes_text_values() {
        assert_eq!(unescape_text(r"a\,b\;c\nd\\e"), "a,b;c\nd\\e");
        assert_eq!(unescape_text(r"trailing\"), "trailing\\");
    }

    #[test]
    fn empty_input_has_no_events() {
        assert!(parse_calendar("").unwrap().is_empty());
    }
}
