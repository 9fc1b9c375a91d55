// Event module
// Calendar event record consumed by the layout and interaction engines

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures for [`CalendarEvent`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("Event id cannot be empty")]
    EmptyId,
    #[error("Event title cannot be empty")]
    EmptyTitle,
    #[error("Event end time must not be before start time")]
    EndBeforeStart,
    #[error("Color must be in hex format (#RRGGBB or #RGB)")]
    InvalidColor,
    #[error("Event {0} is required")]
    MissingField(&'static str),
}

/// Calendar event as owned by the host's event store.
///
/// Instants are timezone-naive. Timed events use their literal end instant;
/// all-day events keep `end` on the last calendar day they cover, so
/// day-granularity logic can always read `end.date()` inclusively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub color: Option<String>,
}

impl CalendarEvent {
    /// Create a new timed event with required fields
    ///
    /// # Examples
    /// ```
    /// use calendar_interaction::models::event::CalendarEvent;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = CalendarEvent::new("standup", "Team Standup", start, end).unwrap();
    /// assert_eq!(event.duration(), chrono::Duration::hours(1));
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, EventError> {
        let event = Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            all_day: false,
            color: None,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create an all-day event covering `first_day..=last_day`
    pub fn all_day(
        id: impl Into<String>,
        title: impl Into<String>,
        first_day: NaiveDate,
        last_day: NaiveDate,
    ) -> Result<Self, EventError> {
        let (start, end) = Self::all_day_range(first_day, last_day);
        let event = Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            all_day: true,
            color: None,
        };
        event.validate()?;
        Ok(event)
    }

    /// Canonical instants for an all-day span (midnight to the last second of `last_day`)
    pub fn all_day_range(first_day: NaiveDate, last_day: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        (
            first_day.and_time(NaiveTime::MIN),
            crate::utils::date::end_of_day(last_day.and_time(NaiveTime::MIN)),
        )
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), EventError> {
        if self.id.trim().is_empty() {
            return Err(EventError::EmptyId);
        }

        if self.title.trim().is_empty() {
            return Err(EventError::EmptyTitle);
        }

        if self.end < self.start {
            return Err(EventError::EndBeforeStart);
        }

        if let Some(ref color) = self.color {
            let digits = color.strip_prefix('#').unwrap_or("");
            let valid_len = digits.len() == 6 || digits.len() == 3;
            if !valid_len || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(EventError::InvalidColor);
            }
        }

        Ok(())
    }

    /// Get the duration of the event
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// First calendar day the event touches
    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    /// Last calendar day the event touches
    pub fn last_day(&self) -> NaiveDate {
        self.end.date()
    }

    /// Copy of this event moved to a new range, for hosts applying a committed result
    pub fn with_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct EventBuilder {
    id: Option<String>,
    title: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    all_day: bool,
    color: Option<String>,
}

impl EventBuilder {
    /// Create a new event builder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Set as all-day event
    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    /// Set the event color (hex format)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Build the event
    pub fn build(self) -> Result<CalendarEvent, EventError> {
        let id = self.id.ok_or(EventError::MissingField("id"))?;
        let title = self.title.ok_or(EventError::MissingField("title"))?;
        let start = self.start.ok_or(EventError::MissingField("start time"))?;
        let end = self.end.ok_or(EventError::MissingField("end time"))?;

        let event = CalendarEvent {
            id,
            title,
            start,
            end,
            all_day: self.all_day,
            color: self.color,
        };

        event.validate()?;
        Ok(event)
    }
}
