use std::path::Path;

use caltally_core::{classify, Classification};

use super::{load_config, Outcome};

/// Print the category a title falls into; exits non-zero for no match.
pub fn run(config: Option<&Path>, title: &str) -> Result<Outcome, Box<dyn std::error::Error>> {
    let categories = load_config(config)?.category_config()?;
    match classify(title, &categories) {
        Classification::Category(name) => {
            println!("{name}");
            Ok(Outcome::Clean)
        }
        Classification::Uncategorized => {
            println!("uncategorized");
            Ok(Outcome::Uncategorized)
        }
    }
}
