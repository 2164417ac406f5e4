//! Day grid construction and event-to-day assignment.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::model::{DateWindow, Event};

/// Aggregation unit for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub events: Vec<Event>,
    /// Accumulated milliseconds per category name.
    pub category_totals: IndexMap<String, i64>,
}

impl DayBucket {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            events: Vec::new(),
            category_totals: IndexMap::new(),
        }
    }

    /// Total for one category, `0` when nothing was recorded.
    pub fn total_for(&self, category: &str) -> i64 {
        self.category_totals.get(category).copied().unwrap_or(0)
    }

    /// Sum of all categorized time on this day.
    pub fn categorized_millis(&self) -> i64 {
        self.category_totals.values().sum()
    }
}

/// One bucket per 24-hour step from the window start, stopping before the end.
pub fn build_grid(window: DateWindow) -> Vec<DayBucket> {
    let mut grid = Vec::new();
    let mut cursor = window.start();
    while cursor < window.end() {
        grid.push(DayBucket::new(cursor.date()));
        cursor += Duration::days(1);
    }
    grid
}

/// Move each event into the bucket matching its start's calendar date.
///
/// Events are compared by local date, not instant, so 00:01 and 23:59 land
/// in the same bucket. Events on dates outside the grid are dropped. Within a
/// bucket events keep their input order.
///
/// Returns the number of dropped events.
pub fn assign(events: Vec<Event>, grid: &mut [DayBucket]) -> usize {
    let index: HashMap<NaiveDate, usize> = grid
        .iter()
        .enumerate()
        .map(|(i, bucket)| (bucket.date, i))
        .collect();

    let mut dropped = 0;
    for event in events {
        match index.get(&event.date()) {
            Some(&i) => grid[i].events.push(event),
            None => {
                debug!(title = %event.title, start = %event.start, "event outside day grid, dropping");
                dropped += 1;
            }
        }
    }
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use proptest::prelude::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn ev(title: &str, start: &str, minutes: i64) -> Event {
        let start = at(start);
        Event::new(title, start, start + Duration::minutes(minutes)).unwrap()
    }

    #[test]
    fn one_bucket_per_day() {
        let grid = build_grid(DateWindow::new(at("2024-01-01 00:00"), at("2024-01-08 00:00")).unwrap());
        assert_eq!(grid.len(), 7);
        assert_eq!(grid[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(grid[6].date, NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert!(grid.iter().all(|b| b.events.is_empty() && b.category_totals.is_empty()));
    }

    #[test]
    fn partial_last_day_still_gets_a_bucket() {
        let grid = build_grid(DateWindow::new(at("2024-01-01 12:00"), at("2024-01-03 06:00")).unwrap());
        let dates: Vec<_> = grid.iter().map(|b| b.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02"]);
    }

    #[test]
    fn grid_crosses_month_and_leap_day() {
        let grid = build_grid(DateWindow::new(at("2024-02-28 00:00"), at("2024-03-02 00:00")).unwrap());
        let dates: Vec<_> = grid.iter().map(|b| b.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-02-28", "2024-02-29", "2024-03-01"]);
    }

    #[test]
    fn assigns_by_calendar_date_not_instant() {
        let mut grid = build_grid(DateWindow::new(at("2024-01-01 00:00"), at("2024-01-03 00:00")).unwrap());
        let dropped = assign(
            vec![ev("Early", "2024-01-02 00:01", 10), ev("Late", "2024-01-02 23:59", 10)],
            &mut grid,
        );
        assert_eq!(dropped, 0);
        assert!(grid[0].events.is_empty());
        let titles: Vec<_> = grid[1].events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Early", "Late"]);
    }

    #[test]
    fn drops_events_outside_grid() {
        let mut grid = build_grid(DateWindow::new(at("2024-01-01 00:00"), at("2024-01-02 00:00")).unwrap());
        let dropped = assign(
            vec![ev("Before", "2023-12-31 10:00", 30), ev("After", "2024-01-02 00:00", 30)],
            &mut grid,
        );
        assert_eq!(dropped, 2);
        assert!(grid[0].events.is_empty());
    }

    proptest! {
        #[test]
        fn grid_has_k_contiguous_days(offset in 0i64..3650, days in 1i64..120) {
            let start = at("2015-01-01 00:00") + Duration::days(offset);
            let grid = build_grid(DateWindow::new(start, start + Duration::days(days)).unwrap());
            prop_assert_eq!(grid.len() as i64, days);
            for pair in grid.windows(2) {
                prop_assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
            }
        }
    }
}
