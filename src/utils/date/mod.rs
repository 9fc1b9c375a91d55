// Date utility functions
// Day-granularity helpers shared by the layout engine and interaction handler

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

pub fn is_same_day(date1: NaiveDateTime, date2: NaiveDateTime) -> bool {
    date1.date() == date2.date()
}

pub fn start_of_day(date: NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN)
}

/// Last whole second of the day containing `date`.
pub fn end_of_day(date: NaiveDateTime) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::seconds(1)
}

/// Signed number of calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    date - Duration::days(day_index_in_week(date, first_day_of_week) as i64)
}

/// Zero-based column of `date` in a week beginning on `first_day_of_week`.
pub fn day_index_in_week(date: NaiveDate, first_day_of_week: u8) -> usize {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    ((weekday - (first_day_of_week % 7) as i64 + 7) % 7) as usize
}

/// The 7 consecutive dates starting at `week_start`.
pub fn week_dates(week_start: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|i| week_start + Duration::days(i as i64))
}
