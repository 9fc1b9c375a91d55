// Event Resize System
//
// Resizing moves one edge of an event while the other stays put.
// - Start edge: adjusts the start (top handle in time grids, left in the month grid)
// - End edge: adjusts the end (bottom handle in time grids, right in the month grid)

use chrono::{Duration, NaiveDateTime};

use crate::models::event::CalendarEvent;

/// Which edge of the event is being resized
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResizeEdge {
    Start,
    #[default]
    End,
}

/// Context for an active resize operation
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeContext {
    /// The event being resized
    pub event: CalendarEvent,
    /// Which edge is being dragged
    pub edge: ResizeEdge,
    /// Event start when the gesture began
    pub original_start: NaiveDateTime,
    /// Event end when the gesture began
    pub original_end: NaiveDateTime,
}

impl ResizeContext {
    pub fn from_event(event: &CalendarEvent, edge: ResizeEdge) -> Self {
        Self {
            event: event.clone(),
            edge,
            original_start: event.start,
            original_end: event.end,
        }
    }

    /// Instant of the edge being dragged, as it was at gesture start
    pub fn original_edge(&self) -> NaiveDateTime {
        match self.edge {
            ResizeEdge::Start => self.original_start,
            ResizeEdge::End => self.original_end,
        }
    }

    /// Range with the active edge placed at `edge_time` and the other edge untouched
    pub fn with_edge_at(&self, edge_time: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        match self.edge {
            ResizeEdge::Start => (edge_time, self.original_end),
            ResizeEdge::End => (self.original_start, edge_time),
        }
    }

    /// Range with the active edge moved by `delta` from its original position.
    ///
    /// Always computed from the snapshot, so repeated updates never drift.
    pub fn shifted_by(&self, delta: Duration) -> (NaiveDateTime, NaiveDateTime) {
        self.with_edge_at(self.original_edge() + delta)
    }

    /// Whether a proposed range keeps the event well-formed.
    ///
    /// All-day events must keep at least their start day; timed events must
    /// stay at least `min_duration` long.
    pub fn is_range_valid(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        min_duration: Duration,
    ) -> bool {
        if self.event.all_day {
            start.date() <= end.date()
        } else {
            end - start >= min_duration
        }
    }
}

/// Payload handed to the host when a resize is committed.
#[derive(Clone, Debug, PartialEq)]
pub struct EventResized {
    pub event: CalendarEvent,
    pub resize_edge: ResizeEdge,
    pub new_start: NaiveDateTime,
    pub new_end: NaiveDateTime,
}

impl EventResized {
    pub fn range(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.new_start, self.new_end)
    }

    pub fn updated_event(&self) -> CalendarEvent {
        self.event.with_range(self.new_start, self.new_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn meeting() -> CalendarEvent {
        CalendarEvent::new("m1", "Meeting", at(15, 10), at(15, 11)).unwrap()
    }

    #[test]
    fn test_end_edge_keeps_start() {
        let context = ResizeContext::from_event(&meeting(), ResizeEdge::End);
        assert_eq!(context.with_edge_at(at(15, 14)), (at(15, 10), at(15, 14)));
        assert_eq!(context.shifted_by(Duration::hours(2)), (at(15, 10), at(15, 13)));
    }

    #[test]
    fn test_start_edge_keeps_end() {
        let context = ResizeContext::from_event(&meeting(), ResizeEdge::Start);
        assert_eq!(context.shifted_by(Duration::hours(-1)), (at(15, 9), at(15, 11)));
    }

    #[test]
    fn test_shift_is_relative_to_snapshot() {
        let context = ResizeContext::from_event(&meeting(), ResizeEdge::End);
        let _ = context.shifted_by(Duration::hours(1));
        assert_eq!(context.shifted_by(Duration::hours(1)), (at(15, 10), at(15, 12)));
    }

    #[test]
    fn test_timed_minimum_duration() {
        let context = ResizeContext::from_event(&meeting(), ResizeEdge::End);
        let min = Duration::minutes(15);

        assert!(context.is_range_valid(at(15, 10), at(15, 11), min));
        assert!(!context.is_range_valid(at(15, 10), at(15, 10), min));
        assert!(!context.is_range_valid(at(15, 10), at(15, 9), min));
    }

    #[test]
    fn test_all_day_keeps_a_day() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let event = CalendarEvent::all_day("h1", "Holiday", day, day).unwrap();
        let context = ResizeContext::from_event(&event, ResizeEdge::End);

        let (start, end) = context.shifted_by(Duration::days(-1));
        assert!(!context.is_range_valid(start, end, Duration::minutes(15)));

        let (start, end) = context.shifted_by(Duration::days(2));
        assert!(context.is_range_valid(start, end, Duration::minutes(15)));
    }
}
