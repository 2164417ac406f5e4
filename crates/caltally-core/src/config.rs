//! TOML-based report configuration.
//!
//! Holds the feed location, the reporting range and the ordered category
//! list. Stored at `~/.config/caltally/config.toml` unless a path is given.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::category::{Category, CategoryConfig};
use crate::error::{ConfigError, CoreError};
use crate::feed::FeedSource;
use crate::model::{AnchorPolicy, DateWindow};
use crate::timestamp::parse_ics_timestamp;

/// Reporting range as written in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeConfig {
    /// First reported instant (date or date-time, local).
    #[serde(default)]
    pub start: Option<String>,
    /// End of the range, exclusive.
    #[serde(default)]
    pub end: Option<String>,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Feed URL (`http`, `https`, `webcal`) or local path.
    #[serde(default)]
    pub feed: Option<String>,
    #[serde(default)]
    pub anchor: AnchorPolicy,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub range: RangeConfig,
    /// Categories in priority order.
    #[serde(default)]
    pub categories: Vec<Category>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed: None,
            anchor: AnchorPolicy::default(),
            timeout_secs: default_timeout_secs(),
            range: RangeConfig::default(),
            categories: Vec::new(),
        }
    }
}

/// Returns `~/.config/caltally[-dev]/` based on CALTALLY_ENV.
///
/// Set CALTALLY_ENV=dev to use the development directory.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .ok_or(ConfigError::NoConfigDir)?;
    let env = std::env::var("CALTALLY_ENV").unwrap_or_else(|_| "production".to_string());
    Ok(if env == "dev" {
        base.join("caltally-dev")
    } else {
        base.join("caltally")
    })
}

/// Parse a range boundary: `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` (also with a
/// space separator) or an iCalendar value such as `20240101T090000`.
pub fn parse_boundary(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    .or_else(|| parse_ics_timestamp(value))
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = match current {
                serde_json::Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
                other => other.get(part)?,
            };
        }
        Some(current)
    }

    /// Default file location.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this schema.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Persist to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = self.to_toml().map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Starter configuration written by `caltally config init`.
    pub fn sample() -> Self {
        Self {
            feed: Some("https://calendar.example.com/basic.ics".into()),
            range: RangeConfig {
                start: Some("2024-01-01".into()),
                end: Some("2024-01-08".into()),
            },
            categories: vec![
                Category::new("Work", ["meeting", "standup", "review"]),
                Category::new("Personal", ["gym", "doctor"]),
            ],
            ..Self::default()
        }
    }

    /// Get a config value as string by dot-separated key (`range.start`,
    /// `categories.0.name`).
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    pub fn feed_source(&self) -> Result<FeedSource, ConfigError> {
        self.feed
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .map(FeedSource::parse)
            .ok_or_else(|| ConfigError::MissingKey("feed".into()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The reporting window from `[range]`.
    ///
    /// # Errors
    ///
    /// Missing or unparseable boundaries are configuration errors; an empty
    /// or inverted range is a validation error.
    pub fn window(&self) -> Result<DateWindow, CoreError> {
        let start = Self::boundary("range.start", self.range.start.as_deref())?;
        let end = Self::boundary("range.end", self.range.end.as_deref())?;
        Ok(DateWindow::new(start, end)?)
    }

    fn boundary(key: &str, value: Option<&str>) -> Result<NaiveDateTime, ConfigError> {
        let value = value.ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;
        parse_boundary(value).ok_or_else(|| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{value}' is not a date or date-time"),
        })
    }

    /// Validated, ordered category list.
    pub fn category_config(&self) -> Result<CategoryConfig, CoreError> {
        Ok(CategoryConfig::new(self.categories.clone())?)
    }
}
