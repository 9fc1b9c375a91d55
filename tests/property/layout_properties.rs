// Property-based tests for the multi-day layout engine and the gesture handler
// Random event sets and random call sequences must never break the invariants

#[path = "../fixtures/mod.rs"]
mod fixtures;

use calendar_interaction::models::event::CalendarEvent;
use calendar_interaction::ui_egui::views::{
    calculate_layouts_in, calculate_month_layout, is_multi_day, sort_events, MonthGrid,
};
use calendar_interaction::ui_egui::{DragHandler, ResizeEdge};
use chrono::{Duration, NaiveDateTime};
use fixtures::dates::{at, jan_1_2025};
use proptest::prelude::*;

/// Raw event shape: start offset in minutes from Dec 15 2024, length in minutes, all-day flag
fn arb_shape() -> impl Strategy<Value = (i64, i64, bool)> {
    (0..(80 * 24 * 60i64), 0..(12 * 24 * 60i64), any::<bool>())
}

fn build_events(shapes: Vec<(i64, i64, bool)>) -> Vec<CalendarEvent> {
    let origin = at(2024, 12, 15, 0, 0);
    shapes
        .into_iter()
        .enumerate()
        .map(|(index, (offset, length, all_day))| {
            let start = origin + Duration::minutes(offset);
            let end = start + Duration::minutes(length);
            let id = format!("e{index:03}");
            if all_day {
                CalendarEvent::all_day(id.clone(), id, start.date(), end.date()).unwrap()
            } else {
                CalendarEvent::new(id.clone(), id, start, end).unwrap()
            }
        })
        .collect()
}

fn arb_events() -> impl Strategy<Value = Vec<CalendarEvent>> {
    prop::collection::vec(arb_shape(), 0..40).prop_map(build_events)
}

fn arb_grid() -> impl Strategy<Value = MonthGrid> {
    (0..40i64, 0..7u8, 1..7usize)
        .prop_map(|(offset, first_day, weeks)| MonthGrid::new(jan_1_2025() + Duration::days(offset), first_day, weeks))
}

#[derive(Debug, Clone)]
enum Op {
    StartDrag,
    StartResize(bool),
    UpdateDrag(i64, bool),
    UpdateResize(i64, bool),
    CompleteDrag,
    CompleteResize,
    CancelDrag,
    CancelResize,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::StartDrag),
        any::<bool>().prop_map(Op::StartResize),
        (-48..48i64, any::<bool>()).prop_map(|(h, v)| Op::UpdateDrag(h, v)),
        (-48..48i64, any::<bool>()).prop_map(|(h, v)| Op::UpdateResize(h, v)),
        Just(Op::CompleteDrag),
        Just(Op::CompleteResize),
        Just(Op::CancelDrag),
        Just(Op::CancelResize),
    ]
}

fn assert_cleared(handler: &DragHandler) {
    assert!(handler.is_idle());
    assert!(handler.active_event().is_none());
    assert!(handler.resize_edge().is_none());
    assert!(handler.proposed_start().is_none());
    assert!(handler.proposed_end().is_none());
    assert!(!handler.is_proposed_valid());
    assert!(handler.highlighted_cells().is_empty());
}

proptest! {
    /// Property: multi-day means the calendar days differ, nothing else
    #[test]
    fn prop_is_multi_day_compares_dates(events in arb_events()) {
        for event in &events {
            prop_assert_eq!(is_multi_day(event), event.start.date() != event.end.date());
        }
    }

    /// Property: sorting is idempotent and independent of input order
    #[test]
    fn prop_sort_is_total_and_idempotent(events in arb_events()) {
        let mut once = events.clone();
        sort_events(&mut once);
        let mut twice = once.clone();
        sort_events(&mut twice);
        prop_assert_eq!(&once, &twice);

        let mut reversed = events;
        reversed.reverse();
        sort_events(&mut reversed);
        prop_assert_eq!(once, reversed);
    }

    /// Property: every layout has segments inside the grid, and boundary
    /// flags are only set where the event truly starts or ends
    #[test]
    fn prop_segments_are_clipped_and_flagged(events in arb_events(), grid in arb_grid()) {
        let layouts = calculate_layouts_in(&events, &grid);

        for layout in &layouts {
            prop_assert!(is_multi_day(&layout.event));
            prop_assert!(!layout.segments.is_empty());

            for segment in &layout.segments {
                prop_assert!(segment.week_row_index < grid.weeks());
                prop_assert!(segment.start_day_in_row <= segment.end_day_in_row);
                prop_assert!(segment.end_day_in_row < 7);

                let dates = grid.week_dates(segment.week_row_index);
                let first = dates[segment.start_day_in_row];
                let last = dates[segment.end_day_in_row];
                prop_assert!(grid.contains(first) && grid.contains(last));
                prop_assert_eq!(segment.is_first_segment, first == layout.event.first_day());
                prop_assert_eq!(segment.is_last_segment, last == layout.event.last_day());
            }
        }

        let laid_out = layouts.len();
        let visible = events
            .iter()
            .filter(|e| is_multi_day(e) && grid.clip(e.first_day(), e.last_day()).is_some())
            .count();
        prop_assert_eq!(laid_out, visible);
    }

    /// Property: bars sharing a row never share a column, and packing is deterministic
    #[test]
    fn prop_week_packing_is_disjoint_and_deterministic(events in arb_events(), grid in arb_grid()) {
        let layouts = calculate_layouts_in(&events, &grid);
        let frames = calculate_month_layout(&layouts, &grid);
        prop_assert_eq!(&frames, &calculate_month_layout(&layouts, &grid));

        for frame in &frames {
            for (i, a) in frame.assignments.iter().enumerate() {
                prop_assert!(a.row < frame.total_rows);
                for b in frame.assignments.iter().skip(i + 1) {
                    if a.row == b.row {
                        prop_assert!(a.end_column < b.start_column || b.end_column < a.start_column);
                    }
                }
            }
        }
    }

    /// Property: the handler never drags and resizes at once, and every
    /// terminal call leaves it fully cleared
    #[test]
    fn prop_handler_modes_are_exclusive(ops in prop::collection::vec(arb_op(), 1..60)) {
        let event = CalendarEvent::new("p", "Probe", at(2025, 1, 15, 10, 0), at(2025, 1, 15, 12, 0)).unwrap();
        let base: NaiveDateTime = event.start;
        let mut handler = DragHandler::new();

        for op in ops {
            let terminal = match op {
                Op::StartDrag => {
                    let _ = handler.start_drag(&event, base.date());
                    false
                }
                Op::StartResize(end) => {
                    let edge = if end { ResizeEdge::End } else { ResizeEdge::Start };
                    let _ = handler.start_resize(&event, edge);
                    false
                }
                Op::UpdateDrag(hours, valid) => {
                    let _ = handler.update_drag(base + Duration::hours(hours), valid, Vec::new());
                    false
                }
                Op::UpdateResize(hours, valid) => {
                    let _ = handler.update_resize(base, event.end + Duration::hours(hours), valid, Vec::new());
                    false
                }
                Op::CompleteDrag => handler.complete_drag().is_ok(),
                Op::CompleteResize => handler.complete_resize().is_ok(),
                Op::CancelDrag => {
                    handler.cancel_drag();
                    true
                }
                Op::CancelResize => {
                    handler.cancel_resize();
                    true
                }
            };

            prop_assert!(!(handler.is_dragging() && handler.is_resizing()));
            if terminal {
                assert_cleared(&handler);
            }
        }
    }

    /// Property: completing without a valid update yields nothing and clears state
    #[test]
    fn prop_complete_without_valid_update_is_empty(hours in -48..48i64, drag in any::<bool>()) {
        let event = CalendarEvent::new("p", "Probe", at(2025, 1, 15, 10, 0), at(2025, 1, 15, 12, 0)).unwrap();
        let mut handler = DragHandler::new();

        if drag {
            handler.start_drag(&event, event.start.date()).unwrap();
            prop_assert_eq!(handler.complete_drag(), Ok(None));
            assert_cleared(&handler);

            handler.start_drag(&event, event.start.date()).unwrap();
            handler.update_drag(event.start + Duration::hours(hours), false, Vec::new()).unwrap();
            prop_assert_eq!(handler.complete_drag(), Ok(None));
        } else {
            handler.start_resize(&event, ResizeEdge::End).unwrap();
            prop_assert_eq!(handler.complete_resize(), Ok(None));
            assert_cleared(&handler);

            handler.start_resize(&event, ResizeEdge::End).unwrap();
            handler.update_resize(event.start, event.end + Duration::hours(hours), false, Vec::new()).unwrap();
            prop_assert_eq!(handler.complete_resize(), Ok(None));
        }
        assert_cleared(&handler);
    }
}
