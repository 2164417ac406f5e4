//! Expansion of base events into concrete occurrences.

use tracing::debug;

use crate::error::{CoreError, Result};
use crate::model::{AnchorPolicy, BaseEvent, DateWindow, Event};

use super::rule::Occurrences;

/// Occurrences of one base event: the literal event first, then every
/// recurrence start inside the window.
///
/// Coinciding starts are not merged, so a recurring event whose own start is
/// inside the window appears twice.
#[derive(Debug, Clone)]
pub struct Expansion {
    anchor: Option<Event>,
    template: Event,
    occurrences: Option<Occurrences>,
}

impl Iterator for Expansion {
    type Item = Event;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(anchor) = self.anchor.take() {
            return Some(anchor);
        }
        let start = self.occurrences.as_mut()?.next()?;
        Some(self.template.shifted_to(start))
    }
}

/// Expand a single base event against `window`.
///
/// # Errors
///
/// Returns [`CoreError::MalformedEvent`] when the base event has no start,
/// no end, or ends before it starts.
pub fn expand(base: &BaseEvent, window: DateWindow, policy: AnchorPolicy) -> Result<Expansion> {
    let start = base
        .start
        .ok_or_else(|| CoreError::malformed(&base.title, "missing DTSTART"))?;
    let end = base
        .end
        .ok_or_else(|| CoreError::malformed(&base.title, "missing DTEND"))?;
    let template = Event::new(base.title.clone(), start, end)
        .ok_or_else(|| CoreError::malformed(&base.title, "DTEND precedes DTSTART"))?;

    let anchor = match policy {
        AnchorPolicy::Always => Some(template.clone()),
        AnchorPolicy::WithinWindow => window.contains(start).then(|| template.clone()),
    };

    Ok(Expansion {
        anchor,
        occurrences: base.rule.as_ref().map(|rule| rule.occurrences(start, window)),
        template,
    })
}

/// Expand every base event into one flat list, in feed order.
///
/// The first malformed event aborts the whole expansion.
pub fn expand_all(
    bases: &[BaseEvent],
    window: DateWindow,
    policy: AnchorPolicy,
) -> Result<Vec<Event>> {
    let mut events = Vec::with_capacity(bases.len());
    for base in bases {
        events.extend(expand(base, window, policy)?);
    }
    debug!(base_events = bases.len(), occurrences = events.len(), "expanded calendar");
    Ok(events)
}
