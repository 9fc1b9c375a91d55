use chrono::NaiveDateTime;

pub mod month_grid;
pub mod multi_day;
pub mod types;

pub use month_grid::{GridGeometry, MonthGrid, MonthTarget, DEFAULT_VISIBLE_WEEKS};
pub use multi_day::{
    calculate_layouts, calculate_layouts_in, calculate_month_layout, calculate_week_layout,
    compare_events, is_multi_day, sort_events, EventLayoutAssignment, MultiDayEventLayout,
    MultiDayRowSegment, WeekEventLayoutFrame,
};
pub use types::HighlightCellInfo;

/// The surface a gesture is aimed at.
///
/// Drivers ask the view which cells a proposed range covers and whether the
/// view accepts the range before pushing it into the handler.
pub trait InteractionTarget {
    fn highlight_cells(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<HighlightCellInfo>;

    fn is_valid(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool;
}
