use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "caltally", version, about = "Per-day category time report from a calendar feed")]
struct Cli {
    /// Configuration file (defaults to ~/.config/caltally/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-day category totals and the uncategorized event list
    Report(commands::RunArgs),
    /// Every reported occurrence with its category
    Events(commands::RunArgs),
    /// Show which category a title falls into
    Classify {
        /// Event title
        title: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("CALTALLY_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Report(args) => commands::report::run(config, &args),
        Commands::Events(args) => commands::events::run(config, &args),
        Commands::Classify { title } => commands::classify::run(config, &title),
        Commands::Config { action } => commands::config::run(config, action),
    };

    match result {
        Ok(commands::Outcome::Clean) => {}
        Ok(commands::Outcome::Uncategorized) => std::process::exit(2),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
