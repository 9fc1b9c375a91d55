//! Shared types for calendar views.

use chrono::NaiveDate;
use egui::Rect;

/// A grid cell currently under a drag or resize proposal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightCellInfo {
    pub date: NaiveDate,
    /// Row-major index in the visible grid (`week_row_index * 7 + column`)
    pub cell_index: usize,
    pub week_row_index: usize,
    /// Screen-space bounds of the cell
    pub bounds: Rect,
    /// First cell of the highlighted run
    pub is_first: bool,
    /// Last cell of the highlighted run
    pub is_last: bool,
}

impl HighlightCellInfo {
    pub fn column(&self) -> usize {
        self.cell_index % 7
    }
}
