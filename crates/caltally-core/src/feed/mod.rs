//! Calendar feed retrieval and parsing.
//!
//! The pipeline itself never touches the network: [`fetch`] completes
//! first, [`parse_calendar`] turns the text into base events, and only then
//! does [`crate::pipeline::run`] start.

pub mod ics;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::error::{CoreError, Result};

pub use ics::parse_calendar;

/// Where the feed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(String),
    File(PathBuf),
}

impl FeedSource {
    /// Interpret a configured feed string.
    ///
    /// `http://` and `https://` are URLs, `webcal://` is rewritten to
    /// `https://`, anything else is a local path.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            FeedSource::Url(raw.to_string())
        } else if lower.starts_with("webcal://") {
            FeedSource::Url(format!("https://{}", &raw["webcal://".len()..]))
        } else {
            FeedSource::File(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Url(url) => f.write_str(url),
            FeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch the raw feed text.
///
/// # Errors
///
/// Transport errors, timeouts, non-success HTTP statuses and unreadable
/// files all become [`CoreError::Retrieval`].
pub async fn fetch(source: &FeedSource, timeout: Duration) -> Result<String> {
    info!(source = %source, "fetching calendar feed");
    match source {
        FeedSource::Url(url) => {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| CoreError::retrieval(url.as_str(), e))?;
            let response = client
                .get(url)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| CoreError::retrieval(url.as_str(), e))?;
            response
                .text()
                .await
                .map_err(|e| CoreError::retrieval(url.as_str(), e))
        }
        FeedSource::File(path) => std::fs::read_to_string(path)
            .map_err(|e| CoreError::retrieval(path.display().to_string(), e)),
    }
}
