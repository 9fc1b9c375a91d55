//! Event lookup for the interaction core.
//!
//! The core only reads events through [`EventSource`]. Writing a committed
//! drop or resize back is the host's job; [`InMemoryEventStore`] is the store
//! used by the demo binary and the tests.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::NaiveDateTime;

use crate::models::event::CalendarEvent;

pub mod crud;
pub mod queries;

pub use queries::{load_month_layouts, load_multi_day_layouts};

/// Read-only access to stored events.
#[cfg_attr(test, mockall::automock)]
pub trait EventSource {
    /// Events whose range touches `[start, end]`, both ends inclusive.
    fn events_intersecting(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<CalendarEvent>>;
}

/// Events held in memory, keyed and iterated by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryEventStore {
    pub(crate) events: BTreeMap<String, CalendarEvent>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CalendarEvent> {
        self.events.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalendarEvent> {
        self.events.values()
    }
}

impl EventSource for InMemoryEventStore {
    fn events_intersecting(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<CalendarEvent>> {
        Ok(self
            .events
            .values()
            .filter(|event| event.start <= end && event.end >= start)
            .cloned()
            .collect())
    }
}
