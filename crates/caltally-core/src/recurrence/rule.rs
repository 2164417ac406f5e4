//! `RRULE` parsing and occurrence generation.

use std::collections::VecDeque;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CoreError;
use crate::model::DateWindow;
use crate::timestamp::{is_date_only, parse_ics_timestamp};

/// Recurrence frequency (`FREQ`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "HOURLY" => Some(Self::Hourly),
            "DAILY" => Some(Self::Daily),
            "WEEKLY" => Some(Self::Weekly),
            "MONTHLY" => Some(Self::Monthly),
            "YEARLY" => Some(Self::Yearly),
            _ => None,
        }
    }
}

/// One `BYDAY` entry, e.g. `MO`, `2TU` or `-1FR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdaySpec {
    pub ordinal: Option<i32>,
    pub weekday: Weekday,
}

impl WeekdaySpec {
    fn parse(value: &str) -> Option<Self> {
        if value.len() < 2 || !value.is_char_boundary(value.len() - 2) {
            return None;
        }
        let (ordinal, day) = value.split_at(value.len() - 2);
        let weekday = parse_weekday(day)?;
        let ordinal = if ordinal.is_empty() {
            None
        } else {
            let n: i32 = ordinal.parse().ok()?;
            if n == 0 || n.abs() > 53 {
                return None;
            }
            Some(n)
        };
        Some(Self { ordinal, weekday })
    }
}

fn parse_weekday(value: &str) -> Option<Weekday> {
    match value {
        "MO" => Some(Weekday::Mon),
        "TU" => Some(Weekday::Tue),
        "WE" => Some(Weekday::Wed),
        "TH" => Some(Weekday::Thu),
        "FR" => Some(Weekday::Fri),
        "SA" => Some(Weekday::Sat),
        "SU" => Some(Weekday::Sun),
        _ => None,
    }
}

/// A parsed recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub interval: u32,
    /// Last allowed occurrence start, inclusive.
    pub until: Option<NaiveDateTime>,
    pub count: Option<u32>,
    pub by_day: Vec<WeekdaySpec>,
    pub by_month_day: Vec<i32>,
    pub by_month: Vec<u32>,
    /// `BYSETPOS`: 1-based positions within each period's set, negative from the end.
    pub by_set_pos: Vec<i32>,
    /// `WKST` as written in the feed. Dropped by [`RecurrenceRule::normalized`].
    pub week_start: Option<Weekday>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: 1,
            until: None,
            count: None,
            by_day: Vec::new(),
            by_month_day: Vec::new(),
            by_month: Vec::new(),
            by_set_pos: Vec::new(),
            week_start: None,
        }
    }

    /// Rule with `WKST` stripped.
    ///
    /// Rule libraries disagree on how a week start shifts week boundaries,
    /// so the field is discarded and weeks always start on Monday.
    pub fn normalized(&self) -> Self {
        Self {
            week_start: None,
            ..self.clone()
        }
    }

    /// Occurrence starts of this rule anchored at `dtstart` that fall in `window`.
    ///
    /// The first instance of a rule is `dtstart` itself (when it matches the
    /// rule's pattern). `COUNT` is counted from `dtstart`, not from the window.
    pub fn occurrences(&self, dtstart: NaiveDateTime, window: DateWindow) -> Occurrences {
        Occurrences {
            rule: self.normalized(),
            dtstart,
            window,
            period: 0,
            pending: VecDeque::new(),
            seen: 0,
            done: false,
        }
    }
}

impl FromStr for RecurrenceRule {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let body = raw.trim();
        let body = body.strip_prefix("RRULE:").unwrap_or(body);

        let mut frequency = None;
        let mut rule = RecurrenceRule::new(Frequency::Daily);

        for part in body.split(';').filter(|p| !p.trim().is_empty()) {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| CoreError::invalid_rule(raw, format!("malformed part '{part}'")))?;
            let key = key.trim().to_ascii_uppercase();
            let value = value.trim().to_ascii_uppercase();

            match key.as_str() {
                "FREQ" => {
                    frequency = Some(Frequency::parse(&value).ok_or_else(|| {
                        CoreError::invalid_rule(raw, format!("unsupported frequency '{value}'"))
                    })?);
                }
                "INTERVAL" => {
                    rule.interval = value
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| CoreError::invalid_rule(raw, "INTERVAL must be a positive integer"))?;
                }
                "COUNT" => {
                    rule.count = Some(
                        value
                            .parse::<u32>()
                            .map_err(|_| CoreError::invalid_rule(raw, "COUNT must be an integer"))?,
                    );
                }
                "UNTIL" => {
                    let until = parse_ics_timestamp(&value)
                        .ok_or_else(|| CoreError::invalid_rule(raw, format!("bad UNTIL '{value}'")))?;
                    // A bare date covers the whole day.
                    rule.until = Some(if is_date_only(&value) {
                        until.date().and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
                    } else {
                        until
                    });
                }
                "BYDAY" => {
                    rule.by_day = value
                        .split(',')
                        .map(|d| {
                            WeekdaySpec::parse(d.trim()).ok_or_else(|| {
                                CoreError::invalid_rule(raw, format!("bad BYDAY entry '{d}'"))
                            })
                        })
                        .collect::<Result<_, _>>()?;
                }
                "BYMONTHDAY" => {
                    rule.by_month_day = value
                        .split(',')
                        .map(|d| {
                            d.trim()
                                .parse::<i32>()
                                .ok()
                                .filter(|n| *n != 0 && n.abs() <= 31)
                                .ok_or_else(|| {
                                    CoreError::invalid_rule(raw, format!("bad BYMONTHDAY entry '{d}'"))
                                })
                        })
                        .collect::<Result<_, _>>()?;
                }
                "BYMONTH" => {
                    rule.by_month = value
                        .split(',')
                        .map(|m| {
                            m.trim()
                                .parse::<u32>()
                                .ok()
                                .filter(|n| (1..=12).contains(n))
                                .ok_or_else(|| {
                                    CoreError::invalid_rule(raw, format!("bad BYMONTH entry '{m}'"))
                                })
                        })
                        .collect::<Result<_, _>>()?;
                }
                "BYSETPOS" => {
                    rule.by_set_pos = value
                        .split(',')
                        .map(|p| {
                            p.trim()
                                .parse::<i32>()
                                .ok()
                                .filter(|n| *n != 0 && n.abs() <= 366)
                                .ok_or_else(|| {
                                    CoreError::invalid_rule(raw, format!("bad BYSETPOS entry '{p}'"))
                                })
                        })
                        .collect::<Result<_, _>>()?;
                }
                // These narrow or expand the set in ways not modelled here.
                "BYWEEKNO" | "BYYEARDAY" | "BYHOUR" | "BYMINUTE" | "BYSECOND" => {
                    return Err(CoreError::invalid_rule(raw, format!("unsupported part '{key}'")));
                }
                "WKST" => {
                    rule.week_start = Some(
                        parse_weekday(&value)
                            .ok_or_else(|| CoreError::invalid_rule(raw, format!("bad WKST '{value}'")))?,
                    );
                }
                other => {
                    warn!(part = other, rule = raw, "ignoring unsupported recurrence rule part");
                }
            }
        }

        rule.frequency = frequency.ok_or_else(|| CoreError::invalid_rule(raw, "missing FREQ"))?;
        Ok(rule)
    }
}

/// Lazy iterator over occurrence starts inside a window.
#[derive(Debug, Clone)]
pub struct Occurrences {
    rule: RecurrenceRule,
    dtstart: NaiveDateTime,
    window: DateWindow,
    period: u32,
    pending: VecDeque<NaiveDateTime>,
    seen: u32,
    done: bool,
}

impl Iterator for Occurrences {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(candidate) = self.pending.pop_front() {
                if self.rule.until.is_some_and(|until| candidate > until)
                    || self.rule.count.is_some_and(|count| self.seen >= count)
                    || candidate >= self.window.end()
                {
                    self.finish();
                    return None;
                }
                self.seen += 1;
                if candidate < self.window.start() {
                    continue;
                }
                return Some(candidate);
            }

            if self.done {
                return None;
            }

            let Some(period_start) = self.period_start(self.period) else {
                self.finish();
                return None;
            };
            if period_start >= self.window.end()
                || self.rule.until.is_some_and(|until| period_start > until)
            {
                self.finish();
                return None;
            }

            let mut candidates = self.period_candidates(self.period);
            self.period = match self.period.checked_add(1) {
                Some(next) => next,
                None => {
                    self.finish();
                    return None;
                }
            };
            candidates.retain(|c| *c >= self.dtstart);
            candidates.sort();
            candidates.dedup();
            self.pending.extend(candidates);
        }
    }
}

impl Occurrences {
    fn finish(&mut self) {
        self.done = true;
        self.pending.clear();
    }

    fn step(&self, period: u32) -> Option<u32> {
        period.checked_mul(self.rule.interval)
    }

    /// Earliest instant any candidate of the period can have.
    fn period_start(&self, period: u32) -> Option<NaiveDateTime> {
        let step = self.step(period)?;
        let date = self.dtstart.date();
        match self.rule.frequency {
            Frequency::Hourly => self
                .dtstart
                .checked_add_signed(Duration::try_hours(i64::from(step))?),
            Frequency::Daily => date
                .checked_add_signed(Duration::try_days(i64::from(step))?)
                .map(midnight),
            Frequency::Weekly => week_monday(date)
                .checked_add_signed(Duration::try_weeks(i64::from(step))?)
                .map(midnight),
            Frequency::Monthly => first_of_month(date)
                .checked_add_months(Months::new(step))
                .map(midnight),
            Frequency::Yearly => {
                let year = date.year().checked_add(i32::try_from(step).ok()?)?;
                NaiveDate::from_ymd_opt(year, 1, 1).map(midnight)
            }
        }
    }

    fn period_candidates(&self, period: u32) -> Vec<NaiveDateTime> {
        let Some(step) = self.step(period) else {
            return Vec::new();
        };
        let time = self.dtstart.time();
        let date = self.dtstart.date();
        let rule = &self.rule;

        let dates: Vec<NaiveDate> = match rule.frequency {
            Frequency::Hourly => {
                let hour: Vec<NaiveDateTime> = Duration::try_hours(i64::from(step))
                    .and_then(|d| self.dtstart.checked_add_signed(d))
                    .filter(|c| self.passes_filters(c.date()))
                    .into_iter()
                    .collect();
                return select_positions(hour, &rule.by_set_pos);
            }
            Frequency::Daily => Duration::try_days(i64::from(step))
                .and_then(|d| date.checked_add_signed(d))
                .into_iter()
                .collect(),
            Frequency::Weekly => {
                let Some(monday) = Duration::try_weeks(i64::from(step))
                    .and_then(|d| week_monday(date).checked_add_signed(d))
                else {
                    return Vec::new();
                };
                let days: Vec<Weekday> = if rule.by_day.is_empty() {
                    vec![date.weekday()]
                } else {
                    rule.by_day.iter().map(|s| s.weekday).collect()
                };
                days.iter()
                    .filter_map(|wd| {
                        monday.checked_add_signed(Duration::days(i64::from(wd.num_days_from_monday())))
                    })
                    .collect()
            }
            Frequency::Monthly => {
                let Some(first) = first_of_month(date).checked_add_months(Months::new(step)) else {
                    return Vec::new();
                };
                self.month_dates(first.year(), first.month())
            }
            Frequency::Yearly => {
                let Some(year) = i32::try_from(step).ok().and_then(|s| date.year().checked_add(s)) else {
                    return Vec::new();
                };
                self.year_dates(year)
            }
        };

        let mut candidates: Vec<NaiveDateTime> = dates
            .into_iter()
            .filter(|d| self.passes_filters(*d))
            .map(|d| d.and_time(time))
            .collect();
        candidates.sort();
        candidates.dedup();
        select_positions(candidates, &rule.by_set_pos)
    }

    /// Filters for parts the frequency does not expand on: `BYMONTH` below
    /// yearly, plain `BYDAY` below weekly and `BYMONTHDAY` below monthly.
    fn passes_filters(&self, date: NaiveDate) -> bool {
        let rule = &self.rule;
        if !rule.by_month.is_empty() && !rule.by_month.contains(&date.month()) {
            return false;
        }
        let finer_than_weekly = matches!(rule.frequency, Frequency::Hourly | Frequency::Daily);
        if finer_than_weekly
            && !rule.by_day.is_empty()
            && !rule.by_day.iter().any(|s| s.weekday == date.weekday())
        {
            return false;
        }
        if (finer_than_weekly || rule.frequency == Frequency::Weekly)
            && !rule.by_month_day.is_empty()
            && !rule.by_month_day.iter().any(|&d| month_day_matches(date, d))
        {
            return false;
        }
        true
    }

    fn month_dates(&self, year: i32, month: u32) -> Vec<NaiveDate> {
        let rule = &self.rule;
        if !rule.by_month_day.is_empty() {
            let last = days_in_month(year, month);
            return rule
                .by_month_day
                .iter()
                .filter_map(|&d| {
                    let day = if d > 0 { d } else { last as i32 + 1 + d };
                    u32::try_from(day).ok().and_then(|day| NaiveDate::from_ymd_opt(year, month, day))
                })
                .filter(|d| {
                    rule.by_day.is_empty() || rule.by_day.iter().any(|s| s.weekday == d.weekday())
                })
                .collect();
        }
        if !rule.by_day.is_empty() {
            let all: Vec<NaiveDate> = (1..=days_in_month(year, month))
                .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
                .collect();
            return select_weekdays(&all, &rule.by_day);
        }
        NaiveDate::from_ymd_opt(year, month, self.dtstart.day())
            .into_iter()
            .collect()
    }

    fn year_dates(&self, year: i32) -> Vec<NaiveDate> {
        let rule = &self.rule;
        if !rule.by_month.is_empty() {
            return rule
                .by_month
                .iter()
                .flat_map(|&m| self.month_dates(year, m))
                .collect();
        }
        if !rule.by_day.is_empty() && rule.by_month_day.is_empty() {
            let all: Vec<NaiveDate> = NaiveDate::from_ymd_opt(year, 1, 1)
                .map(|jan1| {
                    jan1.iter_days()
                        .take_while(|d| d.year() == year)
                        .collect()
                })
                .unwrap_or_default();
            return select_weekdays(&all, &rule.by_day);
        }
        if !rule.by_month_day.is_empty() {
            return (1..=12).flat_map(|m| self.month_dates(year, m)).collect();
        }
        NaiveDate::from_ymd_opt(year, self.dtstart.month(), self.dtstart.day())
            .into_iter()
            .collect()
    }
}

/// Pick dates matching `BYDAY` entries; ordinals count within `dates`.
fn select_weekdays(dates: &[NaiveDate], specs: &[WeekdaySpec]) -> Vec<NaiveDate> {
    let mut picked = Vec::new();
    for spec in specs {
        let matching: Vec<NaiveDate> = dates
            .iter()
            .copied()
            .filter(|d| d.weekday() == spec.weekday)
            .collect();
        match spec.ordinal {
            None => picked.extend(matching),
            Some(n) if n > 0 => picked.extend(matching.get(n as usize - 1).copied()),
            Some(n) => {
                let back = n.unsigned_abs() as usize;
                if back <= matching.len() {
                    picked.push(matching[matching.len() - back]);
                }
            }
        }
    }
    picked
}

/// Keep only the `BYSETPOS` positions of a sorted period set.
fn select_positions(set: Vec<NaiveDateTime>, positions: &[i32]) -> Vec<NaiveDateTime> {
    if positions.is_empty() {
        return set;
    }
    let len = set.len() as i64;
    let mut picked: Vec<NaiveDateTime> = positions
        .iter()
        .filter_map(|&p| {
            let index = if p > 0 { i64::from(p) - 1 } else { len + i64::from(p) };
            usize::try_from(index).ok().and_then(|i| set.get(i).copied())
        })
        .collect();
    picked.sort();
    picked.dedup();
    picked
}

/// Whether `date` is month day `d`, with negative values counting from the end.
fn month_day_matches(date: NaiveDate, d: i32) -> bool {
    let day = date.day() as i32;
    if d > 0 {
        day == d
    } else {
        day == days_in_month(date.year(), date.month()) as i32 + 1 + d
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn window(start: &str, end: &str) -> DateWindow {
        DateWindow::new(at(start), at(end)).unwrap()
    }

    fn starts(rule: &str, dtstart: &str, w: DateWindow) -> Vec<String> {
        let rule: RecurrenceRule = rule.parse().unwrap();
        rule.occurrences(at(dtstart), w)
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .collect()
    }

    #[test]
    fn parses_common_rule() {
        let rule: RecurrenceRule = "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE;WKST=SU".parse().unwrap();
        assert_eq!(rule.frequency, Frequency::Weekly);
        assert_eq!(rule.interval, 2);
        assert_eq!(rule.by_day.len(), 2);
        assert_eq!(rule.week_start, Some(Weekday::Sun));
        assert_eq!(rule.normalized().week_start, None);
    }

    #[test]
    fn accepts_rrule_prefix_and_lowercase() {
        let rule: RecurrenceRule = "RRULE:freq=daily;count=3".parse().unwrap();
        assert_eq!(rule.frequency, Frequency::Daily);
        assert_eq!(rule.count, Some(3));
    }

    #[test]
    fn rejects_missing_or_unknown_frequency() {
        assert!(matches!(
            "INTERVAL=2".parse::<RecurrenceRule>(),
            Err(CoreError::InvalidRule { .. })
        ));
        assert!("FREQ=SECONDLY".parse::<RecurrenceRule>().is_err());
        assert!("FREQ=DAILY;INTERVAL=0".parse::<RecurrenceRule>().is_err());
        assert!("FREQ=WEEKLY;BYDAY=XX".parse::<RecurrenceRule>().is_err());
    }

    #[test]
    fn ignores_unknown_parts() {
        let rule: RecurrenceRule = "FREQ=MONTHLY;X-NAME=1;BYDAY=MO".parse().unwrap();
        assert_eq!(rule.frequency, Frequency::Monthly);
    }

    #[test]
    fn rejects_unmodelled_by_parts() {
        for rule in [
            "FREQ=YEARLY;BYWEEKNO=20",
            "FREQ=YEARLY;BYYEARDAY=100",
            "FREQ=DAILY;BYHOUR=9,17",
        ] {
            assert!(
                matches!(rule.parse::<RecurrenceRule>(), Err(CoreError::InvalidRule { .. })),
                "{rule}"
            );
        }
        assert!("FREQ=MONTHLY;BYSETPOS=0".parse::<RecurrenceRule>().is_err());
    }

    #[test]
    fn parses_ordinal_weekdays() {
        assert_eq!(
            WeekdaySpec::parse("-1FR"),
            Some(WeekdaySpec { ordinal: Some(-1), weekday: Weekday::Fri })
        );
        assert_eq!(
            WeekdaySpec::parse("+2TU"),
            Some(WeekdaySpec { ordinal: Some(2), weekday: Weekday::Tue })
        );
        assert_eq!(WeekdaySpec::parse("0MO"), None);
    }

    #[test]
    fn date_only_until_includes_whole_day() {
        let rule: RecurrenceRule = "FREQ=DAILY;UNTIL=20240103".parse().unwrap();
        assert_eq!(rule.until, Some(at("2024-01-03 23:59") + Duration::seconds(59)));
    }

    #[test]
    fn daily_occurrences_within_window() {
        let got = starts(
            "FREQ=DAILY",
            "2024-01-01 09:00",
            window("2024-01-03 00:00", "2024-01-06 00:00"),
        );
        assert_eq!(got, vec!["2024-01-03 09:00", "2024-01-04 09:00", "2024-01-05 09:00"]);
    }

    #[test]
    fn first_instance_is_dtstart() {
        let got = starts(
            "FREQ=DAILY;COUNT=2",
            "2024-01-01 09:00",
            window("2024-01-01 00:00", "2024-01-10 00:00"),
        );
        assert_eq!(got, vec!["2024-01-01 09:00", "2024-01-02 09:00"]);
    }

    #[test]
    fn count_is_measured_from_dtstart() {
        let got = starts(
            "FREQ=DAILY;COUNT=5",
            "2024-01-01 09:00",
            window("2024-01-04 00:00", "2024-01-31 00:00"),
        );
        assert_eq!(got, vec!["2024-01-04 09:00", "2024-01-05 09:00"]);
    }

    #[test]
    fn until_is_inclusive() {
        let got = starts(
            "FREQ=DAILY;UNTIL=20240103T090000",
            "2024-01-01 09:00",
            window("2024-01-01 00:00", "2024-01-31 00:00"),
        );
        assert_eq!(got.len(), 3);
        assert_eq!(got.last().unwrap(), "2024-01-03 09:00");
    }

    #[test]
    fn weekly_by_day_uses_monday_weeks() {
        // Wed 2024-01-03 anchor, every other week on Mon and Fri.
        let got = starts(
            "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,FR;WKST=SU",
            "2024-01-03 10:00",
            window("2024-01-01 00:00", "2024-01-22 00:00"),
        );
        assert_eq!(got, vec!["2024-01-05 10:00", "2024-01-15 10:00", "2024-01-19 10:00"]);
    }

    #[test]
    fn weekly_without_by_day_repeats_anchor_weekday() {
        let got = starts(
            "FREQ=WEEKLY",
            "2024-01-02 08:00",
            window("2024-01-01 00:00", "2024-01-20 00:00"),
        );
        assert_eq!(got, vec!["2024-01-02 08:00", "2024-01-09 08:00", "2024-01-16 08:00"]);
    }

    #[test]
    fn monthly_skips_missing_days() {
        let got = starts(
            "FREQ=MONTHLY",
            "2024-01-31 12:00",
            window("2024-01-01 00:00", "2024-06-01 00:00"),
        );
        assert_eq!(got, vec!["2024-01-31 12:00", "2024-03-31 12:00", "2024-05-31 12:00"]);
    }

    #[test]
    fn monthly_by_ordinal_weekday() {
        let got = starts(
            "FREQ=MONTHLY;BYDAY=-1FR",
            "2024-01-01 16:00",
            window("2024-01-01 00:00", "2024-04-01 00:00"),
        );
        assert_eq!(got, vec!["2024-01-26 16:00", "2024-02-23 16:00", "2024-03-29 16:00"]);
    }

    #[test]
    fn monthly_by_month_filters_months() {
        let got = starts(
            "FREQ=MONTHLY;BYMONTH=1,3",
            "2024-01-10 09:00",
            window("2024-01-01 00:00", "2024-05-01 00:00"),
        );
        assert_eq!(got, vec!["2024-01-10 09:00", "2024-03-10 09:00"]);
    }

    #[test]
    fn monthly_last_weekday_by_set_pos() {
        let got = starts(
            "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-1",
            "2024-01-01 17:00",
            window("2024-01-01 00:00", "2024-04-01 00:00"),
        );
        // Mar 31 2024 is a Sunday.
        assert_eq!(got, vec!["2024-01-31 17:00", "2024-02-29 17:00", "2024-03-29 17:00"]);
    }

    #[test]
    fn daily_by_month_day_filters_days() {
        let got = starts(
            "FREQ=DAILY;BYMONTHDAY=1,15",
            "2024-01-01 09:00",
            window("2024-01-01 00:00", "2024-02-01 00:00"),
        );
        assert_eq!(got, vec!["2024-01-01 09:00", "2024-01-15 09:00"]);
    }

    #[test]
    fn weekly_by_month_day_filters_days() {
        // Mondays that are also the last day of the month.
        let got = starts(
            "FREQ=WEEKLY;BYDAY=MO;BYMONTHDAY=-1",
            "2024-01-01 09:00",
            window("2024-01-01 00:00", "2024-12-01 00:00"),
        );
        assert_eq!(got, vec!["2024-09-30 09:00"]);
    }

    #[test]
    fn hourly_by_month_day_filters_days() {
        let got = starts(
            "FREQ=HOURLY;INTERVAL=12;BYMONTHDAY=2",
            "2024-01-01 00:00",
            window("2024-01-01 00:00", "2024-01-04 00:00"),
        );
        assert_eq!(got, vec!["2024-01-02 00:00", "2024-01-02 12:00"]);
    }

    #[test]
    fn monthly_by_negative_month_day() {
        let got = starts(
            "FREQ=MONTHLY;BYMONTHDAY=-1",
            "2024-01-01 09:00",
            window("2024-01-01 00:00", "2024-03-15 00:00"),
        );
        assert_eq!(got, vec!["2024-01-31 09:00", "2024-02-29 09:00"]);
    }

    #[test]
    fn yearly_repeats_anchor_date() {
        let got = starts(
            "FREQ=YEARLY",
            "2020-02-29 10:00",
            window("2020-01-01 00:00", "2025-01-01 00:00"),
        );
        assert_eq!(got, vec!["2020-02-29 10:00", "2024-02-29 10:00"]);
    }

    #[test]
    fn daily_by_day_filters_weekends() {
        let got = starts(
            "FREQ=DAILY;BYDAY=MO,TU,WE,TH,FR",
            "2024-01-05 09:00",
            window("2024-01-05 00:00", "2024-01-10 00:00"),
        );
        assert_eq!(got, vec!["2024-01-05 09:00", "2024-01-08 09:00", "2024-01-09 09:00"]);
    }

    #[test]
    fn hourly_steps_by_interval() {
        let got = starts(
            "FREQ=HOURLY;INTERVAL=6",
            "2024-01-01 00:00",
            window("2024-01-01 05:00", "2024-01-02 00:00"),
        );
        assert_eq!(got, vec!["2024-01-01 06:00", "2024-01-01 12:00", "2024-01-01 18:00"]);
    }

    #[test]
    fn anchor_after_window_yields_nothing() {
        let got = starts(
            "FREQ=DAILY",
            "2024-02-01 09:00",
            window("2024-01-01 00:00", "2024-01-10 00:00"),
        );
        assert!(got.is_empty());
    }
}
