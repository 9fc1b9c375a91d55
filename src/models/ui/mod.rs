// UI models module
// View kinds and the grid unit a keyboard step moves by

use chrono::Duration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewType {
    Day,
    Week,
    #[default]
    Month,
}

impl ViewType {
    /// Unit moved by one directional key press in this view
    pub fn grid_unit(&self, time_slot: Duration) -> GridUnit {
        match self {
            ViewType::Month => GridUnit::Day,
            ViewType::Day | ViewType::Week => GridUnit::TimeSlot(time_slot),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridUnit {
    Day,
    TimeSlot(Duration),
}

impl GridUnit {
    pub fn duration(&self) -> Duration {
        match self {
            GridUnit::Day => Duration::days(1),
            GridUnit::TimeSlot(slot) => *slot,
        }
    }
}
