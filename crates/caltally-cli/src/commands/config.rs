use std::path::{Path, PathBuf};

use caltally_core::Config;
use clap::Subcommand;

use super::{load_config, Outcome};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the config file location
    Path,
    /// Print the whole configuration as TOML
    Show,
    /// Get a config value
    Get {
        /// Dot-separated key (e.g. "range.start", "categories.0.name")
        key: String,
    },
    /// Write a starter config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn resolve_path(config: Option<&Path>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(match config {
        Some(path) => path.to_path_buf(),
        None => Config::default_path()?,
    })
}

pub fn run(config: Option<&Path>, action: ConfigAction) -> Result<Outcome, Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Path => {
            println!("{}", resolve_path(config)?.display());
        }
        ConfigAction::Show => {
            let config = load_config(config)?;
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Get { key } => {
            let config = load_config(config)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown or unset key: {key}").into()),
            }
        }
        ConfigAction::Init { force } => {
            let path = resolve_path(config)?;
            if path.exists() && !force {
                return Err(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )
                .into());
            }
            Config::sample().save_to(&path)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(Outcome::Clean)
}
