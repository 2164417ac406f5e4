//! Core error types for caltally-core.
//!
//! Every fatal condition of a report run maps onto one [`CoreError`]
//! variant. A title that matches no category is not an error; it is
//! reported through [`crate::Classification::Uncategorized`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for caltally-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The feed could not be fetched or read
    #[error("Failed to retrieve feed from {source_desc}: {message}")]
    Retrieval {
        source_desc: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A base event lacks required fields or has an impossible time range
    #[error("Malformed event '{title}': {reason}")]
    MalformedEvent { title: String, reason: String },

    /// A recurrence rule could not be understood
    #[error("Invalid recurrence rule '{rule}': {message}")]
    InvalidRule { rule: String, message: String },

    /// The calendar stream itself is unreadable
    #[error("Failed to parse calendar: {0}")]
    Parse(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub(crate) fn retrieval(
        source_desc: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        CoreError::Retrieval {
            source_desc: source_desc.into(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    pub(crate) fn malformed(title: &str, reason: impl Into<String>) -> Self {
        CoreError::MalformedEvent {
            title: title.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_rule(rule: &str, message: impl Into<String>) -> Self {
        CoreError::InvalidRule {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Configuration directory could not be determined
    #[error("Could not determine a configuration directory")]
    NoConfigDir,
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Window end does not come after its start
    #[error("Invalid date window: end ({end}) must be after start ({start})")]
    InvalidWindow {
        start: chrono::NaiveDateTime,
        end: chrono::NaiveDateTime,
    },

    /// Two categories share a name
    #[error("Duplicate category name: {0}")]
    DuplicateCategory(String),

    /// Category with an empty name or keyword
    #[error("Category '{category}' has an empty {what}")]
    EmptyCategoryField { category: String, what: &'static str },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retrieval_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = CoreError::retrieval("cal.ics", io);
        assert_eq!(
            err.to_string(),
            "Failed to retrieve feed from cal.ics: no such file"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn config_error_converts_into_core_error() {
        let err: CoreError = ConfigError::MissingKey("range.start".into()).into();
        assert!(matches!(err, CoreError::Config(ConfigError::MissingKey(_))));
    }
}
