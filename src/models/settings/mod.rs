// Settings module
// Snap, grid and week options passed to the interaction engine

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("first_day_of_week must be between 0 (Sunday) and 6 (Saturday), got {0}")]
    InvalidFirstDayOfWeek(u8),
    #[error("time_slot_minutes must divide a day evenly, got {0}")]
    InvalidTimeSlot(u32),
    #[error("visible_weeks must be at least 1")]
    NoVisibleWeeks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Magnetic snapping to the time-slot grid
    pub snap_to_time_slots: bool,
    /// Magnetic snapping to start/end of other visible events
    pub snap_to_other_events: bool,
    /// Magnetic snapping to the current-time marker
    pub snap_to_current_time: bool,
    pub snap_range_minutes: u32,
    pub time_slot_minutes: u32,
    /// 0 = Sunday .. 6 = Saturday
    pub first_day_of_week: u8,
    /// Shortest timed event a resize may produce
    pub min_event_minutes: u32,
    /// Week rows in the month grid
    pub visible_weeks: usize,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            snap_to_time_slots: true,
            snap_to_other_events: true,
            snap_to_current_time: false,
            snap_range_minutes: 10,
            time_slot_minutes: 15,
            first_day_of_week: 0, // Sunday
            min_event_minutes: 15,
            visible_weeks: 6,
        }
    }
}

impl InteractionSettings {
    pub fn snap_range(&self) -> Duration {
        Duration::minutes(self.snap_range_minutes as i64)
    }

    pub fn time_slot_duration(&self) -> Duration {
        Duration::minutes(self.time_slot_minutes as i64)
    }

    pub fn min_event_duration(&self) -> Duration {
        Duration::minutes(self.min_event_minutes as i64)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.first_day_of_week > 6 {
            return Err(SettingsError::InvalidFirstDayOfWeek(self.first_day_of_week));
        }

        if self.time_slot_minutes == 0 || MINUTES_PER_DAY % self.time_slot_minutes != 0 {
            return Err(SettingsError::InvalidTimeSlot(self.time_slot_minutes));
        }

        if self.visible_weeks == 0 {
            return Err(SettingsError::NoVisibleWeeks);
        }

        Ok(())
    }
}
