//! Recurrence rules and their expansion into concrete occurrences.

mod expander;
mod rule;

pub use expander::{expand, expand_all, Expansion};
pub use rule::{Frequency, Occurrences, RecurrenceRule, WeekdaySpec};
