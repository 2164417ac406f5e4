//! # caltally Core Library
//!
//! Turns a calendar feed into a per-day, per-category time report.
//! The CLI binary is a thin layer over this crate.
//!
//! ## Pipeline
//!
//! - **Recurrence**: expands each base event into concrete occurrences
//!   inside the reporting window
//! - **Grid**: one bucket per calendar day, events assigned by local date
//! - **Category**: first-match keyword classification of event titles
//! - **Aggregate**: per-day category totals plus the uncategorized list
//!
//! ## Key Components
//!
//! - [`pipeline::run`]: runs the four stages over parsed events
//! - [`feed`]: feed retrieval and ICS parsing
//! - [`Config`]: TOML configuration

pub mod aggregate;
pub mod category;
pub mod config;
pub mod error;
pub mod feed;
pub mod grid;
pub mod hours;
pub mod model;
pub mod pipeline;
pub mod recurrence;
pub mod timestamp;

pub use aggregate::{aggregate, Aggregation};
pub use category::{classify, Category, CategoryConfig, Classification};
pub use config::Config;
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use feed::FeedSource;
pub use grid::{assign, build_grid, DayBucket};
pub use hours::millis_to_hours;
pub use model::{AnchorPolicy, BaseEvent, DateWindow, Event};
pub use pipeline::Report;
pub use recurrence::{expand, expand_all, RecurrenceRule};
