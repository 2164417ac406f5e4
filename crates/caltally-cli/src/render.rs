//! Report rendering: ASCII tables, JSON and CSV.
//!
//! Pure formatting over a finished [`Report`]; every number shown is
//! hours from [`millis_to_hours`].

use std::io::Write;

use caltally_core::{millis_to_hours, DayBucket, Event, Report};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

const DATE_FORMAT: &str = "%a %b %d %Y";

fn display_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn display_hours(millis: i64) -> String {
    millis_to_hours(millis).to_string()
}

/// Render rows as a boxed ASCII table.
pub fn table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let separator = {
        let mut line = String::from("+");
        for w in &widths {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };
    let format_row = |cells: &[String]| {
        let mut line = String::from("|");
        for (i, w) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = w - cell.chars().count();
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(pad + 1));
            line.push('|');
        }
        line.push('\n');
        line
    };

    let mut output = separator.clone();
    output.push_str(&format_row(headers));
    output.push_str(&separator);
    for row in rows {
        output.push_str(&format_row(row));
    }
    if !rows.is_empty() {
        output.push_str(&separator);
    }
    output
}

fn day_headers(categories: &[String]) -> Vec<String> {
    std::iter::once("Date".to_string())
        .chain(categories.iter().cloned())
        .chain(std::iter::once("Total".to_string()))
        .collect()
}

fn day_row(day: &DayBucket, categories: &[String]) -> Vec<String> {
    let mut row = vec![display_date(day.date)];
    row.extend(categories.iter().map(|c| display_hours(day.total_for(c))));
    row.push(display_hours(day.categorized_millis()));
    row
}

fn event_row(event: &Event) -> Vec<String> {
    vec![
        display_date(event.date()),
        event.title.clone(),
        display_hours(event.duration_millis),
    ]
}

fn event_headers() -> Vec<String> {
    ["Date", "Title", "Time"].map(String::from).to_vec()
}

/// `Date | <categories> | Total`, one row per day.
pub fn days_table(report: &Report, categories: &[String]) -> String {
    let rows: Vec<_> = report.days.iter().map(|d| day_row(d, categories)).collect();
    table(&day_headers(categories), &rows)
}

/// `Date | Title | Time` for every uncategorized event.
pub fn uncategorized_table(events: &[Event]) -> String {
    let rows: Vec<_> = events.iter().map(event_row).collect();
    table(&event_headers(), &rows)
}

#[derive(Serialize)]
struct JsonDay {
    date: NaiveDate,
    totals: IndexMap<String, f64>,
    total: f64,
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    date: NaiveDate,
    title: &'a str,
    hours: f64,
    duration_millis: i64,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    days: Vec<JsonDay>,
    uncategorized: Vec<JsonEvent<'a>>,
}

pub fn json(report: &Report, categories: &[String]) -> serde_json::Result<String> {
    let days = report
        .days
        .iter()
        .map(|day| JsonDay {
            date: day.date,
            totals: categories
                .iter()
                .map(|c| (c.clone(), millis_to_hours(day.total_for(c))))
                .collect(),
            total: millis_to_hours(day.categorized_millis()),
        })
        .collect();
    let uncategorized = report
        .uncategorized
        .iter()
        .map(|e| JsonEvent {
            date: e.date(),
            title: &e.title,
            hours: millis_to_hours(e.duration_millis),
            duration_millis: e.duration_millis,
        })
        .collect();
    serde_json::to_string_pretty(&JsonReport {
        days,
        uncategorized,
    })
}

/// Day rows, then the uncategorized rows under their own header when present.
pub fn write_csv<W: Write>(report: &Report, categories: &[String], out: W) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);
    writer.write_record(day_headers(categories))?;
    for day in &report.days {
        writer.write_record(day_row(day, categories))?;
    }
    if !report.uncategorized.is_empty() {
        writer.write_record(event_headers())?;
        for event in &report.uncategorized {
            writer.write_record(event_row(event))?;
        }
    }
    writer.flush()?;
    Ok(())
}
