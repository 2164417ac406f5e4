//! `caltally events`: every occurrence that lands in the day grid, with its category.

use std::path::Path;

use caltally_core::{assign, build_grid, classify, expand_all, millis_to_hours};
use serde::Serialize;

use super::{load_config, load_events, Format, Outcome, RunArgs};
use crate::render;

#[derive(Serialize)]
struct EventLine {
    start: chrono::NaiveDateTime,
    end: chrono::NaiveDateTime,
    title: String,
    category: Option<String>,
    hours: f64,
}

pub fn run(config: Option<&Path>, args: &RunArgs) -> Result<Outcome, Box<dyn std::error::Error>> {
    let inputs = args.resolve(load_config(config)?)?;
    let bases = load_events(&inputs)?;

    let mut grid = build_grid(inputs.window);
    assign(expand_all(&bases, inputs.window, inputs.anchor)?, &mut grid);

    let lines: Vec<EventLine> = grid
        .iter()
        .flat_map(|day| &day.events)
        .map(|event| EventLine {
            start: event.start,
            end: event.end,
            title: event.title.clone(),
            category: classify(&event.title, &inputs.categories)
                .category()
                .map(String::from),
            hours: millis_to_hours(event.duration_millis),
        })
        .collect();

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&lines)?),
        Format::Table | Format::Csv => {
            let headers = ["Start", "End", "Title", "Category", "Hours"].map(String::from);
            let rows: Vec<Vec<String>> = lines
                .iter()
                .map(|l| {
                    vec![
                        l.start.format("%Y-%m-%d %H:%M").to_string(),
                        l.end.format("%Y-%m-%d %H:%M").to_string(),
                        l.title.clone(),
                        l.category.clone().unwrap_or_else(|| "uncategorized".into()),
                        l.hours.to_string(),
                    ]
                })
                .collect();
            if matches!(args.format, Format::Csv) {
                let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
                writer.write_record(&headers)?;
                for row in &rows {
                    writer.write_record(row)?;
                }
                writer.flush()?;
            } else {
                print!("{}", render::table(&headers, &rows));
            }
        }
    }

    Ok(Outcome::Clean)
}
