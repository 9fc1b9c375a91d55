// Test fixtures - reusable test data
// Provides consistent dates and events across all test files
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    /// Returns Jan 1, 2025 (a Wednesday)
    pub fn jan_1_2025() -> NaiveDate {
        date(2025, 1, 1)
    }

    /// Returns Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        date(2024, 2, 29)
    }
}

/// Sample events for testing
pub mod events {
    use super::dates::{at, date};
    use calendar_interaction::models::event::CalendarEvent;

    /// Timed one-hour meeting on Wed Jan 15 2025
    pub fn meeting() -> CalendarEvent {
        CalendarEvent::new("meeting", "Team Meeting", at(2025, 1, 15, 10, 0), at(2025, 1, 15, 11, 0))
            .unwrap()
    }

    /// All-day trip from Fri Jan 17 to Tue Jan 21 2025, crossing a Sunday week start
    pub fn trip() -> CalendarEvent {
        CalendarEvent::all_day("trip", "Ski Trip", date(2025, 1, 17), date(2025, 1, 21)).unwrap()
    }

    /// Timed overnight shift Jan 8 22:00 - Jan 9 06:00
    pub fn night_shift() -> CalendarEvent {
        CalendarEvent::new(
            "night",
            "Night Shift",
            at(2025, 1, 8, 22, 0),
            at(2025, 1, 9, 6, 0),
        )
        .unwrap()
    }

    /// Mon-Thu, Tue-Wed and Fri-Sat in the week of Jan 12 2025
    pub fn packing_week() -> Vec<CalendarEvent> {
        vec![
            CalendarEvent::all_day("a", "A", date(2025, 1, 13), date(2025, 1, 16)).unwrap(),
            CalendarEvent::all_day("b", "B", date(2025, 1, 14), date(2025, 1, 15)).unwrap(),
            CalendarEvent::all_day("c", "C", date(2025, 1, 17), date(2025, 1, 18)).unwrap(),
        ]
    }
}
