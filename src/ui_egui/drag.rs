use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::event::CalendarEvent;
use crate::utils::date::days_between;

/// Length in minutes given to an all-day event dropped onto the timed grid
pub const DEFAULT_CONVERTED_MINUTES: i64 = 60;

/// Kind of area a dragged event is hovering over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropRegion {
    AllDay,
    Timed,
}

impl DropRegion {
    pub fn of(event: &CalendarEvent) -> Self {
        if event.all_day {
            DropRegion::AllDay
        } else {
            DropRegion::Timed
        }
    }
}

/// Change of all-day-ness caused by a drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TypeConversion {
    #[default]
    None,
    AllDayToTimed,
    TimedToAllDay,
}

impl TypeConversion {
    pub fn between(source_all_day: bool, target: DropRegion) -> Self {
        match (source_all_day, target) {
            (true, DropRegion::Timed) => TypeConversion::AllDayToTimed,
            (false, DropRegion::AllDay) => TypeConversion::TimedToAllDay,
            _ => TypeConversion::None,
        }
    }
}

/// State of an in-flight move gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct DragContext {
    pub event: CalendarEvent,
    /// Day under the pointer when the drag began
    pub reference_date: NaiveDate,
    pub original_start: NaiveDateTime,
    pub original_end: NaiveDateTime,
    pub duration: Duration,
    pub target_region: DropRegion,
    /// Last start pushed by the driver, before any type conversion
    pub hovered_start: Option<NaiveDateTime>,
}

impl DragContext {
    pub fn from_event(event: &CalendarEvent, reference_date: NaiveDate) -> Self {
        Self {
            event: event.clone(),
            reference_date,
            original_start: event.start,
            original_end: event.end,
            duration: event.duration(),
            target_region: DropRegion::of(event),
            hovered_start: None,
        }
    }

    pub fn type_conversion(&self) -> TypeConversion {
        TypeConversion::between(self.event.all_day, self.target_region)
    }

    /// Start the event would have if the grabbed day landed on `hovered_date`.
    pub fn start_for_hovered_date(&self, hovered_date: NaiveDate) -> NaiveDateTime {
        self.original_start + Duration::days(days_between(self.reference_date, hovered_date))
    }

    /// Range occupied when the event's start moves to `proposed_start`.
    pub fn proposed_range(&self, proposed_start: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        match self.type_conversion() {
            TypeConversion::None => (proposed_start, proposed_start + self.duration),
            TypeConversion::AllDayToTimed => {
                (proposed_start, proposed_start + Duration::minutes(DEFAULT_CONVERTED_MINUTES))
            }
            TypeConversion::TimedToAllDay => {
                let span = days_between(self.original_start.date(), self.original_end.date());
                let first_day = proposed_start.date();
                CalendarEvent::all_day_range(first_day, first_day + Duration::days(span))
            }
        }
    }
}

/// Payload handed to the host when a move is committed.
#[derive(Clone, Debug, PartialEq)]
pub struct EventDropped {
    pub event: CalendarEvent,
    pub old_start: NaiveDateTime,
    pub old_end: NaiveDateTime,
    pub new_start: NaiveDateTime,
    pub new_end: NaiveDateTime,
    pub type_conversion: TypeConversion,
}

impl EventDropped {
    pub fn range(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.new_start, self.new_end)
    }

    /// The event as it should be stored after the drop
    pub fn updated_event(&self) -> CalendarEvent {
        let mut event = self.event.with_range(self.new_start, self.new_end);
        match self.type_conversion {
            TypeConversion::AllDayToTimed => event.all_day = false,
            TypeConversion::TimedToAllDay => event.all_day = true,
            TypeConversion::None => {}
        }
        event
    }
}
