//! Snapping of proposed drag/resize times.
//!
//! Two independent layers: magnetic anchors (time-slot boundary, other events'
//! edges, the current-time marker) pull a time only when they lie within the
//! snap range; when none does, the time is quantised to the nearest slot
//! boundary regardless of the magnetic settings.

use chrono::{Duration, NaiveDateTime};

use super::resize::ResizeEdge;
use crate::models::event::CalendarEvent;
use crate::models::settings::InteractionSettings;
use crate::utils::date::start_of_day;

/// Anchor kinds, declared in tie-break priority order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SnapKind {
    TimeSlot,
    OtherEvent,
    CurrentTime,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapCandidate {
    pub instant: NaiveDateTime,
    pub kind: SnapKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapResult {
    pub instant: NaiveDateTime,
    /// Anchor that won, `None` when the slot-grid fallback was applied
    pub kind: Option<SnapKind>,
}

/// Context collected by the caller for one snap query.
#[derive(Clone, Copy, Debug, Default)]
pub struct SnapAnchors<'a> {
    /// Visible events whose timed edges attract
    pub other_events: &'a [CalendarEvent],
    /// The event being moved, skipped as an anchor
    pub exclude_id: Option<&'a str>,
    pub now: Option<NaiveDateTime>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapResolver {
    snap_to_time_slots: bool,
    snap_to_other_events: bool,
    snap_to_current_time: bool,
    snap_range: Duration,
    time_slot: Duration,
}

impl SnapResolver {
    pub fn new(settings: &InteractionSettings) -> Self {
        Self {
            snap_to_time_slots: settings.snap_to_time_slots,
            snap_to_other_events: settings.snap_to_other_events,
            snap_to_current_time: settings.snap_to_current_time,
            snap_range: settings.snap_range(),
            time_slot: settings.time_slot_duration(),
        }
    }

    pub fn time_slot(&self) -> Duration {
        self.time_slot
    }

    /// Closest multiple of the slot duration counted from the instant's midnight
    pub fn nearest_slot_boundary(&self, instant: NaiveDateTime) -> NaiveDateTime {
        let day_start = start_of_day(instant);
        let slot = self.time_slot.num_seconds().max(1);
        let offset = (instant - day_start).num_seconds();
        let rounded = (offset + slot / 2) / slot * slot;
        day_start + Duration::seconds(rounded)
    }

    /// Every enabled anchor, regardless of distance
    pub fn candidates(&self, raw: NaiveDateTime, anchors: &SnapAnchors<'_>) -> Vec<SnapCandidate> {
        let mut candidates = Vec::new();

        if self.snap_to_time_slots {
            candidates.push(SnapCandidate {
                instant: self.nearest_slot_boundary(raw),
                kind: SnapKind::TimeSlot,
            });
        }

        if self.snap_to_other_events {
            let edges = anchors
                .other_events
                .iter()
                .filter(|event| !event.all_day)
                .filter(|event| Some(event.id.as_str()) != anchors.exclude_id)
                .flat_map(|event| [event.start, event.end]);
            candidates.extend(edges.map(|instant| SnapCandidate {
                instant,
                kind: SnapKind::OtherEvent,
            }));
        }

        if self.snap_to_current_time {
            if let Some(now) = anchors.now {
                candidates.push(SnapCandidate {
                    instant: now,
                    kind: SnapKind::CurrentTime,
                });
            }
        }

        candidates
    }

    pub fn resolve(&self, raw: NaiveDateTime, anchors: &SnapAnchors<'_>) -> SnapResult {
        let best = self
            .candidates(raw, anchors)
            .into_iter()
            .filter(|candidate| (candidate.instant - raw).abs() <= self.snap_range)
            .min_by_key(|candidate| ((candidate.instant - raw).abs(), candidate.kind, candidate.instant));

        match best {
            Some(candidate) => SnapResult {
                instant: candidate.instant,
                kind: Some(candidate.kind),
            },
            None => SnapResult {
                instant: self.nearest_slot_boundary(raw),
                kind: None,
            },
        }
    }

    /// Move keeping the duration: both edges shift by the snapped start delta
    pub fn snap_move(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        raw_start: NaiveDateTime,
        anchors: &SnapAnchors<'_>,
    ) -> (NaiveDateTime, NaiveDateTime) {
        let delta = self.resolve(raw_start, anchors).instant - start;
        (start + delta, end + delta)
    }

    /// Resize keeping the untouched edge
    pub fn snap_resize(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        edge: ResizeEdge,
        raw_edge: NaiveDateTime,
        anchors: &SnapAnchors<'_>,
    ) -> (NaiveDateTime, NaiveDateTime) {
        let snapped = self.resolve(raw_edge, anchors).instant;
        match edge {
            ResizeEdge::Start => (snapped, end),
            ResizeEdge::End => (start, snapped),
        }
    }
}
