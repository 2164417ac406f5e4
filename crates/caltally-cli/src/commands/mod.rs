pub mod classify;
pub mod config;
pub mod events;
pub mod report;

use std::path::Path;
use std::time::Duration;

use caltally_core::feed::{self, FeedSource};
use caltally_core::{AnchorPolicy, BaseEvent, CategoryConfig, Config, CoreError, DateWindow};
use clap::{Args, ValueEnum};

/// How a successful command ended. Errors are reported separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    /// At least one event matched no category.
    Uncategorized,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Format {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AnchorArg {
    Always,
    WithinWindow,
}

impl From<AnchorArg> for AnchorPolicy {
    fn from(arg: AnchorArg) -> Self {
        match arg {
            AnchorArg::Always => AnchorPolicy::Always,
            AnchorArg::WithinWindow => AnchorPolicy::WithinWindow,
        }
    }
}

/// Options shared by commands that run the pipeline.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Feed URL or path, overriding the config file
    #[arg(long)]
    pub feed: Option<String>,
    /// Range start (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
    #[arg(long)]
    pub from: Option<String>,
    /// Range end, exclusive
    #[arg(long)]
    pub to: Option<String>,
    /// Whether base events outside the range are reported
    #[arg(long, value_enum)]
    pub anchor: Option<AnchorArg>,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table)]
    pub format: Format,
}

/// Everything one pipeline run needs, after CLI overrides.
pub struct Inputs {
    pub source: FeedSource,
    pub window: DateWindow,
    pub categories: CategoryConfig,
    pub anchor: AnchorPolicy,
    pub timeout: Duration,
}

pub fn load_config(path: Option<&Path>) -> Result<Config, CoreError> {
    Ok(match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    })
}

impl RunArgs {
    /// Apply command-line overrides on top of the config file.
    pub fn resolve(&self, mut config: Config) -> Result<Inputs, CoreError> {
        if let Some(feed) = &self.feed {
            config.feed = Some(feed.clone());
        }
        if let Some(from) = &self.from {
            config.range.start = Some(from.clone());
        }
        if let Some(to) = &self.to {
            config.range.end = Some(to.clone());
        }
        if let Some(anchor) = self.anchor {
            config.anchor = anchor.into();
        }
        Ok(Inputs {
            source: config.feed_source()?,
            window: config.window()?,
            categories: config.category_config()?,
            anchor: config.anchor,
            timeout: config.timeout(),
        })
    }
}

/// Fetch and parse the feed. Runs to completion before any report work.
pub fn load_events(inputs: &Inputs) -> Result<Vec<BaseEvent>, CoreError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let text = runtime.block_on(feed::fetch(&inputs.source, inputs.timeout))?;
    feed::parse_calendar(&text)
}
