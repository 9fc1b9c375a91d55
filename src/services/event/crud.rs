use anyhow::{bail, Context, Result};

use super::InMemoryEventStore;
use crate::models::event::CalendarEvent;
use crate::ui_egui::drag::EventDropped;
use crate::ui_egui::resize::EventResized;

impl InMemoryEventStore {
    /// Add a new event. Fails when the event is malformed or its id is taken.
    pub fn insert(&mut self, event: CalendarEvent) -> Result<()> {
        event
            .validate()
            .with_context(|| format!("Cannot store event {:?}", event.id))?;
        if self.events.contains_key(&event.id) {
            bail!("Event {} already exists", event.id);
        }

        self.events.insert(event.id.clone(), event);
        Ok(())
    }

    /// Replace an existing event
    pub fn update(&mut self, event: CalendarEvent) -> Result<()> {
        event
            .validate()
            .with_context(|| format!("Cannot store event {:?}", event.id))?;
        let Some(slot) = self.events.get_mut(&event.id) else {
            bail!("Event {} not found", event.id);
        };

        *slot = event;
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Option<CalendarEvent> {
        self.events.remove(id)
    }

    /// Write a committed drop back, including any all-day conversion.
    pub fn apply_drop(&mut self, dropped: &EventDropped) -> Result<CalendarEvent> {
        let updated = dropped.updated_event();
        self.update(updated.clone())?;
        log::info!(
            "Moved event {} from {} to {}",
            updated.id,
            dropped.old_start,
            dropped.new_start
        );
        Ok(updated)
    }

    pub fn apply_resize(&mut self, resized: &EventResized) -> Result<CalendarEvent> {
        let updated = resized.updated_event();
        self.update(updated.clone())?;
        log::info!(
            "Resized event {} by {:?} edge to {} - {}",
            updated.id,
            resized.resize_edge,
            updated.start,
            updated.end
        );
        Ok(updated)
    }
}
