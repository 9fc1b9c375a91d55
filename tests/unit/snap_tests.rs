// Table-driven tests for the snap resolver
// Each case gives the settings toggles, a raw pointer time and the expected outcome

use calendar_interaction::models::event::CalendarEvent;
use calendar_interaction::models::settings::InteractionSettings;
use calendar_interaction::ui_egui::{ResizeEdge, SnapAnchors, SnapKind, SnapResolver};
use chrono::{NaiveDate, NaiveDateTime};
use test_case::test_case;

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn neighbours() -> Vec<CalendarEvent> {
    vec![
        CalendarEvent::new("dentist", "Dentist", at(9, 5), at(9, 50)).unwrap(),
        CalendarEvent::new("call", "Call", at(14, 20), at(14, 40)).unwrap(),
        CalendarEvent::all_day("leave", "Leave", at(0, 0).date(), at(0, 0).date()).unwrap(),
    ]
}

fn settings(slots: bool, events: bool, now: bool) -> InteractionSettings {
    InteractionSettings {
        snap_to_time_slots: slots,
        snap_to_other_events: events,
        snap_to_current_time: now,
        ..Default::default()
    }
}

#[test_case(true, true, false, at(9, 7), at(9, 5), Some(SnapKind::OtherEvent); "event start closer than slot")]
#[test_case(true, false, false, at(9, 7), at(9, 0), Some(SnapKind::TimeSlot); "slot when event snapping off")]
#[test_case(true, true, false, at(14, 22), at(14, 20), Some(SnapKind::OtherEvent); "call start")]
#[test_case(true, true, false, at(14, 37), at(14, 40), Some(SnapKind::OtherEvent); "call end")]
#[test_case(true, true, true, at(11, 59), at(12, 0), Some(SnapKind::TimeSlot); "slot beats now on a tie")]
#[test_case(true, true, false, at(14, 25), at(14, 30), Some(SnapKind::TimeSlot); "slot beats event edge on a tie")]
#[test_case(false, false, true, at(11, 51), at(11, 58), Some(SnapKind::CurrentTime); "now marker alone")]
#[test_case(false, false, false, at(16, 37), at(16, 30), None; "grid fallback without magnets")]
#[test_case(false, true, false, at(23, 0), at(23, 0), None; "fallback when nothing in range")]
#[test_case(true, true, false, at(0, 4), at(0, 0), Some(SnapKind::TimeSlot); "all-day edges never attract")]
fn snap_resolves(
    slots: bool,
    events: bool,
    now: bool,
    raw: NaiveDateTime,
    expected: NaiveDateTime,
    kind: Option<SnapKind>,
) {
    let others = neighbours();
    let resolver = SnapResolver::new(&settings(slots, events, now));
    let anchors = SnapAnchors {
        other_events: &others,
        exclude_id: None,
        now: Some(at(11, 58)),
    };

    let result = resolver.resolve(raw, &anchors);
    assert_eq!(result.instant, expected);
    assert_eq!(result.kind, kind);
}

#[test_case(15, at(10, 7), at(10, 0); "quarter hour down")]
#[test_case(15, at(10, 8), at(10, 15); "quarter hour up")]
#[test_case(30, at(10, 44), at(10, 30); "half hour down")]
#[test_case(60, at(10, 30), at(11, 0); "hour rounds half up")]
#[test_case(5, at(10, 2), at(10, 0); "five minute grid")]
fn slot_boundaries(slot_minutes: u32, raw: NaiveDateTime, expected: NaiveDateTime) {
    let resolver = SnapResolver::new(&InteractionSettings {
        time_slot_minutes: slot_minutes,
        ..Default::default()
    });
    assert_eq!(resolver.nearest_slot_boundary(raw), expected);
}

#[test_case(true, true, false, at(9, 7), at(9, 5), Some(SnapKind::OtherEvent); "closest anchor wins")]
#[test_case(false, false, false, at(9, 7), at(9, 0), None; "fallback still quantises")]
fn ties_and_fallback_are_deterministic(
    slots: bool,
    events: bool,
    now: bool,
    raw: NaiveDateTime,
    expected: NaiveDateTime,
    kind: Option<SnapKind>,
) {
    let mut others = neighbours();
    let resolver = SnapResolver::new(&settings(slots, events, now));

    let first = resolver.resolve(raw, &SnapAnchors { other_events: &others, exclude_id: None, now: None });
    others.reverse();
    let second = resolver.resolve(raw, &SnapAnchors { other_events: &others, exclude_id: None, now: None });

    assert_eq!(first, second);
    assert_eq!((first.instant, first.kind), (expected, kind));
}

#[test_case(false, true, true, at(12, 1), at(12, 4), Some(SnapKind::OtherEvent); "event edge beats now")]
#[test_case(true, true, true, at(12, 2), at(12, 0), Some(SnapKind::TimeSlot); "slot beats event edge at noon")]
#[test_case(false, true, false, at(12, 0), at(11, 56), Some(SnapKind::OtherEvent); "equal edges pick the earlier")]
fn equal_distances_follow_priority(
    slots: bool,
    events: bool,
    now: bool,
    raw: NaiveDateTime,
    expected: NaiveDateTime,
    kind: Option<SnapKind>,
) {
    let others = vec![
        CalendarEvent::new("early", "Early", at(10, 0), at(11, 56)).unwrap(),
        CalendarEvent::new("late", "Late", at(12, 4), at(13, 0)).unwrap(),
    ];
    let resolver = SnapResolver::new(&settings(slots, events, now));
    let anchors = SnapAnchors {
        other_events: &others,
        exclude_id: None,
        now: Some(at(11, 58)),
    };

    let result = resolver.resolve(raw, &anchors);
    assert_eq!((result.instant, result.kind), (expected, kind));
}

#[test]
fn excluded_event_does_not_attract_itself() {
    let others = neighbours();
    let resolver = SnapResolver::new(&InteractionSettings::default());
    let anchors = SnapAnchors {
        other_events: &others,
        exclude_id: Some("dentist"),
        now: None,
    };

    let result = resolver.resolve(at(9, 7), &anchors);
    assert_eq!(result.instant, at(9, 0));
    assert_eq!(result.kind, Some(SnapKind::TimeSlot));
}

#[test_case(ResizeEdge::End, at(14, 38), (at(13, 0), at(14, 40)); "end edge onto call end")]
#[test_case(ResizeEdge::Start, at(9, 48), (at(9, 50), at(15, 0)); "start edge onto dentist end")]
fn resize_keeps_untouched_edge(
    edge: ResizeEdge,
    raw: NaiveDateTime,
    expected: (NaiveDateTime, NaiveDateTime),
) {
    let others = neighbours();
    let resolver = SnapResolver::new(&InteractionSettings::default());
    let anchors = SnapAnchors {
        other_events: &others,
        exclude_id: None,
        now: None,
    };

    let (start, end) = match edge {
        ResizeEdge::Start => (at(13, 0), at(15, 0)),
        ResizeEdge::End => (at(13, 0), at(14, 0)),
    };
    assert_eq!(resolver.snap_resize(start, end, edge, raw, &anchors), expected);
}

#[test]
fn move_keeps_duration() {
    let others = neighbours();
    let resolver = SnapResolver::new(&InteractionSettings::default());
    let anchors = SnapAnchors {
        other_events: &others,
        exclude_id: None,
        now: None,
    };

    let (start, end) = resolver.snap_move(at(8, 0), at(8, 45), at(9, 53), &anchors);
    assert_eq!((start, end), (at(9, 50), at(10, 35)));
}
