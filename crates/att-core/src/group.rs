//! Partitioning of a swipe batch into per-identity-per-day groups.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::event::{IdentityKey, SwipeEvent};

/// An event paired with its parsed timestamp (`None` when malformed).
#[derive(Debug, Clone, Copy)]
pub struct TimedEvent<'a> {
    pub event: &'a SwipeEvent,
    pub timestamp: Option<NaiveDateTime>,
}

/// All events of one identity on one day, sorted by time of day.
#[derive(Debug, Clone)]
pub struct EventGroup<'a> {
    pub key: IdentityKey,
    pub events: Vec<TimedEvent<'a>>,
}

/// Groups events by (name, tag, date).
///
/// Groups come out in the order their key was first seen. Within a group,
/// events are stably sorted by the literal time string, so malformed times
/// still have a deterministic position.
pub fn group_events(events: &[SwipeEvent]) -> Vec<EventGroup<'_>> {
    let mut index: HashMap<IdentityKey, usize> = HashMap::new();
    let mut groups: Vec<EventGroup<'_>> = Vec::new();

    for event in events {
        let key = event.key();
        let slot = if let Some(&slot) = index.get(&key) {
            slot
        } else {
            let slot = groups.len();
            index.insert(key.clone(), slot);
            groups.push(EventGroup {
                key,
                events: Vec::new(),
            });
            slot
        };
        groups[slot].events.push(TimedEvent {
            event,
            timestamp: event.timestamp(),
        });
    }

    for group in &mut groups {
        group.events.sort_by(|a, b| a.event.time.cmp(&b.event.time));
    }

    tracing::debug!(
        event_count = events.len(),
        group_count = groups.len(),
        "grouped swipe events"
    );
    groups
}
