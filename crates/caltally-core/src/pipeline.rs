//! End-to-end report pipeline: expand, grid, assign, aggregate.

use serde::Serialize;
use tracing::debug;

use crate::aggregate::{aggregate, Aggregation};
use crate::category::CategoryConfig;
use crate::error::Result;
use crate::grid::{assign, build_grid, DayBucket};
use crate::model::{AnchorPolicy, BaseEvent, DateWindow, Event};
use crate::recurrence::expand_all;

/// Result of one report run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub days: Vec<DayBucket>,
    pub uncategorized: Vec<Event>,
    /// Occurrences whose start date fell outside the day grid.
    pub dropped: usize,
}

impl Report {
    /// True when every reported event matched a category.
    pub fn is_clean(&self) -> bool {
        self.uncategorized.is_empty()
    }
}

/// Run the whole pipeline over parsed base events.
///
/// # Errors
///
/// Fails with [`crate::CoreError::MalformedEvent`] if any base event is
/// missing its start or end; no partial report is produced.
pub fn run(
    bases: &[BaseEvent],
    window: DateWindow,
    categories: &CategoryConfig,
    policy: AnchorPolicy,
) -> Result<Report> {
    let events = expand_all(bases, window, policy)?;
    let mut grid = build_grid(window);
    let dropped = assign(events, &mut grid);
    let Aggregation {
        days,
        uncategorized,
    } = aggregate(grid, categories);
    debug!(
        days = days.len(),
        uncategorized = uncategorized.len(),
        dropped,
        "report ready"
    );
    Ok(Report {
        days,
        uncategorized,
        dropped,
    })
}
