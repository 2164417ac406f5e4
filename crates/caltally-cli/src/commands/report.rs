//! `caltally report`: the per-day category table and the uncategorized list.

use std::path::Path;

use caltally_core::pipeline;
use tracing::warn;

use super::{load_config, load_events, Format, Outcome, RunArgs};
use crate::render;

pub fn run(config: Option<&Path>, args: &RunArgs) -> Result<Outcome, Box<dyn std::error::Error>> {
    let inputs = args.resolve(load_config(config)?)?;
    let bases = load_events(&inputs)?;
    let report = pipeline::run(&bases, inputs.window, &inputs.categories, inputs.anchor)?;
    let names: Vec<String> = inputs.categories.names().map(String::from).collect();

    match args.format {
        Format::Table => {
            print!("{}", render::days_table(&report, &names));
            if !report.is_clean() {
                println!();
                println!("Uncategorized events");
                print!("{}", render::uncategorized_table(&report.uncategorized));
            }
        }
        Format::Json => println!("{}", render::json(&report, &names)?),
        Format::Csv => render::write_csv(&report, &names, std::io::stdout().lock())?,
    }

    if report.is_clean() {
        Ok(Outcome::Clean)
    } else {
        warn!(count = report.uncategorized.len(), "events matched no category");
        Ok(Outcome::Uncategorized)
    }
}
