//! Per-day, per-category accumulation of event durations.

use serde::Serialize;

use crate::category::{classify, CategoryConfig, Classification};
use crate::grid::DayBucket;
use crate::model::Event;

/// Populated day grid plus every event that matched no category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    pub days: Vec<DayBucket>,
    pub uncategorized: Vec<Event>,
}

/// Sum durations into each bucket's category totals.
///
/// Buckets are visited chronologically and events in bucket order, which
/// is also the order of the uncategorized list. The grid is consumed: totals
/// accumulate in a single pass and a fresh grid is needed for another run.
pub fn aggregate(mut grid: Vec<DayBucket>, config: &CategoryConfig) -> Aggregation {
    let mut uncategorized = Vec::new();
    for bucket in &mut grid {
        for event in &bucket.events {
            match classify(&event.title, config) {
                Classification::Category(name) => {
                    *bucket.category_totals.entry(name.to_string()).or_insert(0) +=
                        event.duration_millis;
                }
                Classification::Uncategorized => uncategorized.push(event.clone()),
            }
        }
    }
    Aggregation {
        days: grid,
        uncategorized,
    }
}
