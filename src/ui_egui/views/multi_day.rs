//! Multi-day event layout for the month grid.
//!
//! Events that cross a day boundary are drawn as bars. Each bar is split into
//! one segment per visible week row, and within a week the segments are packed
//! greedily into rows: every segment takes the lowest row whose occupied
//! columns it does not overlap. Processing order comes from [`compare_events`],
//! so the same event set always packs the same way. First-fit does not always
//! reach the minimum row count; determinism is what the month view relies on.

use std::cmp::Ordering;

use chrono::{Duration, NaiveDate};

use super::month_grid::{MonthGrid, DEFAULT_VISIBLE_WEEKS};
use crate::models::event::CalendarEvent;
use crate::utils::date::{days_between, is_same_day};

/// One week-row slice of a multi-day event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MultiDayRowSegment {
    pub week_row_index: usize,
    /// Zero-based column (0-6) of the first day in this row
    pub start_day_in_row: usize,
    /// Zero-based column (0-6) of the last day in this row
    pub end_day_in_row: usize,
    /// Slice contains the event's real start (not a week or grid cut)
    pub is_first_segment: bool,
    /// Slice contains the event's real end (not a week or grid cut)
    pub is_last_segment: bool,
}

impl MultiDayRowSegment {
    pub fn span_days(&self) -> usize {
        self.end_day_in_row - self.start_day_in_row + 1
    }

    fn overlaps_columns(&self, start_column: usize, end_column: usize) -> bool {
        self.start_day_in_row <= end_column && start_column <= self.end_day_in_row
    }
}

/// A multi-day event with its segments, ordered by week row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiDayEventLayout {
    pub event: CalendarEvent,
    pub segments: Vec<MultiDayRowSegment>,
}

/// Final packed position of one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLayoutAssignment {
    pub event: CalendarEvent,
    pub segment: MultiDayRowSegment,
    /// Vertical slot inside the week, 0 = top
    pub row: usize,
    pub start_column: usize,
    pub end_column: usize,
}

impl EventLayoutAssignment {
    pub fn column_span(&self) -> usize {
        self.end_column - self.start_column + 1
    }

    pub fn covers_column(&self, column: usize) -> bool {
        self.start_column <= column && column <= self.end_column
    }
}

/// Packing result for one week row of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekEventLayoutFrame {
    pub week_row_index: usize,
    pub week_dates: [NaiveDate; 7],
    /// Sorted by row, then start column
    pub assignments: Vec<EventLayoutAssignment>,
    /// Highest row index used + 1, 0 when the week has no bars
    pub total_rows: usize,
    /// Highest occupied row per column, `None` for untouched columns
    pub column_max_rows: [Option<usize>; 7],
}

impl WeekEventLayoutFrame {
    pub fn max_row_at(&self, column: usize) -> Option<usize> {
        self.column_max_rows.get(column).copied().flatten()
    }

    pub fn is_cell_occupied(&self, column: usize, row: usize) -> bool {
        self.assignments
            .iter()
            .any(|a| a.row == row && a.covers_column(column))
    }

    /// Assignments that fit in the first `max_rows` rows of a cell
    pub fn visible_assignments(&self, max_rows: usize) -> impl Iterator<Item = &EventLayoutAssignment> {
        self.assignments.iter().filter(move |a| a.row < max_rows)
    }

    /// Bars at `column` pushed below `max_rows` (the "+N more" count)
    pub fn hidden_count(&self, column: usize, max_rows: usize) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.row >= max_rows && a.covers_column(column))
            .count()
    }
}

/// True when the event starts and ends on different calendar days.
///
/// Only the calendar day matters: time of day and the all-day flag are ignored.
pub fn is_multi_day(event: &CalendarEvent) -> bool {
    !is_same_day(event.start, event.end)
}

fn stacking_rank(event: &CalendarEvent) -> u8 {
    match (is_multi_day(event), event.all_day) {
        (true, true) => 0,
        (true, false) => 1,
        (false, true) => 2,
        (false, false) => 3,
    }
}

/// Total order for visual stacking: all-day multi-day bars first, then timed
/// multi-day, all-day single-day and timed single-day events. Within a
/// category: earlier start, then longer duration, then id.
pub fn compare_events(a: &CalendarEvent, b: &CalendarEvent) -> Ordering {
    stacking_rank(a)
        .cmp(&stacking_rank(b))
        .then_with(|| a.start.cmp(&b.start))
        .then_with(|| b.duration().cmp(&a.duration()))
        .then_with(|| a.id.cmp(&b.id))
}

pub fn sort_events(events: &mut [CalendarEvent]) {
    events.sort_by(compare_events);
}

/// Layouts for the default number of week rows, starting with the week that
/// contains `grid_start`.
pub fn calculate_layouts(
    events: &[CalendarEvent],
    grid_start: NaiveDate,
    first_day_of_week: u8,
) -> Vec<MultiDayEventLayout> {
    let grid = MonthGrid::new(grid_start, first_day_of_week, DEFAULT_VISIBLE_WEEKS);
    calculate_layouts_in(events, &grid)
}

/// Segment every multi-day event that intersects `grid`, in stacking order.
pub fn calculate_layouts_in(events: &[CalendarEvent], grid: &MonthGrid) -> Vec<MultiDayEventLayout> {
    let mut multi_day: Vec<&CalendarEvent> = events.iter().filter(|e| is_multi_day(e)).collect();
    multi_day.sort_by(|a, b| compare_events(a, b));

    let layouts: Vec<MultiDayEventLayout> = multi_day
        .into_iter()
        .filter_map(|event| {
            let segments = segment_event(event, grid);
            if segments.is_empty() {
                None
            } else {
                Some(MultiDayEventLayout {
                    event: event.clone(),
                    segments,
                })
            }
        })
        .collect();

    log::trace!(
        "Laid out {} multi-day events across {} weeks from {}",
        layouts.len(),
        grid.weeks(),
        grid.first_date()
    );
    layouts
}

fn segment_event(event: &CalendarEvent, grid: &MonthGrid) -> Vec<MultiDayRowSegment> {
    let true_first = event.first_day();
    let true_last = event.last_day();
    let Some((first, last)) = grid.clip(true_first, true_last) else {
        return Vec::new();
    };

    let mut segments = Vec::new();
    let mut cursor = first;
    while cursor <= last {
        let Some((row, column)) = grid.position_of(cursor) else {
            break;
        };
        let week_end = cursor + Duration::days((6 - column) as i64);
        let segment_last = week_end.min(last);

        segments.push(MultiDayRowSegment {
            week_row_index: row,
            start_day_in_row: column,
            end_day_in_row: column + days_between(cursor, segment_last) as usize,
            is_first_segment: cursor <= true_first && true_first <= segment_last,
            is_last_segment: cursor <= true_last && true_last <= segment_last,
        });

        cursor = segment_last + Duration::days(1);
    }
    segments
}

/// Greedy first-fit packing of the segments that fall on `week_row_index`.
pub fn calculate_week_layout(
    layouts: &[MultiDayEventLayout],
    week_dates: [NaiveDate; 7],
    week_row_index: usize,
) -> WeekEventLayoutFrame {
    let mut ordered: Vec<&MultiDayEventLayout> = layouts.iter().collect();
    ordered.sort_by(|a, b| compare_events(&a.event, &b.event));

    let mut rows: Vec<Vec<MultiDayRowSegment>> = Vec::new();
    let mut column_max_rows = [None; 7];
    let mut assignments = Vec::new();

    for layout in ordered {
        for segment in layout
            .segments
            .iter()
            .filter(|s| s.week_row_index == week_row_index)
        {
            let (start_column, end_column) = (segment.start_day_in_row, segment.end_day_in_row);
            let free_row = rows.iter().position(|occupied| {
                occupied
                    .iter()
                    .all(|placed| !placed.overlaps_columns(start_column, end_column))
            });
            let row = match free_row {
                Some(row) => row,
                None => {
                    rows.push(Vec::new());
                    rows.len() - 1
                }
            };
            rows[row].push(*segment);

            for slot in column_max_rows.iter_mut().take(end_column + 1).skip(start_column) {
                *slot = Some(slot.map_or(row, |current: usize| current.max(row)));
            }

            assignments.push(EventLayoutAssignment {
                event: layout.event.clone(),
                segment: *segment,
                row,
                start_column,
                end_column,
            });
        }
    }

    assignments.sort_by_key(|a| (a.row, a.start_column));

    WeekEventLayoutFrame {
        week_row_index,
        week_dates,
        assignments,
        total_rows: rows.len(),
        column_max_rows,
    }
}

/// One packed frame per week row of `grid`.
pub fn calculate_month_layout(
    layouts: &[MultiDayEventLayout],
    grid: &MonthGrid,
) -> Vec<WeekEventLayoutFrame> {
    (0..grid.weeks())
        .map(|row| calculate_week_layout(layouts, grid.week_dates(row), row))
        .collect()
}
