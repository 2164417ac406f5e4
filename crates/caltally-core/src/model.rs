//! Event and window types shared by every pipeline stage.
//!
//! All timestamps are local wall-clock values ([`NaiveDateTime`]). The
//! report works on local calendar dates and never normalizes time zones.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::recurrence::RecurrenceRule;

/// One concrete occurrence with a fixed start and end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_millis: i64,
}

impl Event {
    /// Build an event from its bounds. Returns `None` when `end < start`.
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        if end < start {
            return None;
        }
        Some(Self {
            title: title.into(),
            start,
            end,
            duration_millis: (end - start).num_milliseconds(),
        })
    }

    /// Same title and duration, moved to a new start.
    pub fn shifted_to(&self, start: NaiveDateTime) -> Self {
        Self {
            title: self.title.clone(),
            start,
            end: start + Duration::milliseconds(self.duration_millis),
            duration_millis: self.duration_millis,
        }
    }

    /// Local calendar date of the start.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }
}

/// An event as read from the feed, before expansion.
///
/// `start` and `end` are optional so that a feed entry missing them can be
/// carried to the expander, which rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BaseEvent {
    pub title: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub rule: Option<RecurrenceRule>,
}

impl BaseEvent {
    /// A single, non-recurring event.
    pub fn single(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            start: Some(start),
            end: Some(end),
            rule: None,
        }
    }

    pub fn with_rule(mut self, rule: RecurrenceRule) -> Self {
        self.rule = Some(rule);
        self
    }
}

/// Half-open reporting interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window covering whole days from `first` up to, not including, `last`.
    pub fn from_dates(first: NaiveDate, last: NaiveDate) -> Result<Self, ValidationError> {
        Self::new(
            first.and_time(chrono::NaiveTime::MIN),
            last.and_time(chrono::NaiveTime::MIN),
        )
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant < self.end
    }
}

/// Whether the literal base event is reported when it starts outside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorPolicy {
    /// Always yield the base event, wherever it starts.
    #[default]
    Always,
    /// Yield the base event only when its start lies inside the window.
    WithinWindow,
}
