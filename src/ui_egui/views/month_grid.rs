//! The visible month grid: which dates are shown, where each date sits,
//! and which cells a proposed range lights up.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use egui::{Pos2, Rect, Vec2};

use super::types::HighlightCellInfo;
use super::InteractionTarget;
use crate::utils::date::{day_index_in_week, days_between, get_week_start, week_dates};

/// Week rows shown when the caller only supplies a grid start
pub const DEFAULT_VISIBLE_WEEKS: usize = 6;

/// Window of dates shown by a month view.
///
/// Row 0 is the week (per `first_day_of_week`) containing `grid_start`; every
/// row shows all 7 columns, so leading days of that week are visible too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    week_start: NaiveDate,
    first_day_of_week: u8,
    weeks: usize,
}

impl MonthGrid {
    pub fn new(grid_start: NaiveDate, first_day_of_week: u8, weeks: usize) -> Self {
        Self {
            week_start: get_week_start(grid_start, first_day_of_week),
            first_day_of_week: first_day_of_week % 7,
            weeks: weeks.max(1),
        }
    }

    /// Grid for the month containing `date`, including leading and trailing
    /// days of the adjacent months, with as many week rows as the month needs.
    pub fn for_month(date: NaiveDate, first_day_of_week: u8) -> Self {
        let first_of_month = date.with_day(1).unwrap_or(date);
        let leading = day_index_in_week(first_of_month, first_day_of_week);
        let total_cells = leading + days_in_month(first_of_month) as usize;
        let weeks_needed = (total_cells + 6) / 7;

        Self::new(
            get_week_start(first_of_month, first_day_of_week),
            first_day_of_week,
            weeks_needed,
        )
    }

    /// Month grid with a fixed number of rows, as used by layouts that must
    /// not change height between months.
    pub fn for_month_fixed(date: NaiveDate, first_day_of_week: u8, weeks: usize) -> Self {
        let grid = Self::for_month(date, first_day_of_week);
        Self::new(grid.week_start, first_day_of_week, weeks)
    }

    pub fn first_day_of_week(&self) -> u8 {
        self.first_day_of_week
    }

    pub fn weeks(&self) -> usize {
        self.weeks
    }

    pub fn first_date(&self) -> NaiveDate {
        self.week_start
    }

    pub fn last_date(&self) -> NaiveDate {
        self.week_start + Duration::days(self.weeks as i64 * 7 - 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_date() && date <= self.last_date()
    }

    /// All visible dates in order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.first_date()
            .iter_days()
            .take_while(|date| *date <= self.last_date())
            .collect()
    }

    /// The 7 dates of a week row
    pub fn week_dates(&self, week_row_index: usize) -> [NaiveDate; 7] {
        week_dates(self.week_start + Duration::days(week_row_index as i64 * 7))
    }

    /// `(week_row_index, column)` of a visible date
    pub fn position_of(&self, date: NaiveDate) -> Option<(usize, usize)> {
        if !self.contains(date) {
            return None;
        }
        let offset = days_between(self.week_start, date) as usize;
        Some((offset / 7, offset % 7))
    }

    pub fn cell_index(&self, date: NaiveDate) -> Option<usize> {
        self.position_of(date).map(|(row, column)| row * 7 + column)
    }

    /// Clip an inclusive day range to the grid window, `None` when disjoint.
    pub fn clip(&self, first: NaiveDate, last: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let clipped_first = first.max(self.first_date());
        let clipped_last = last.min(self.last_date());
        (clipped_first <= clipped_last).then_some((clipped_first, clipped_last))
    }

    /// Cells covered by `start..=end` (day granularity), clipped to the grid.
    pub fn highlight_cells(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        geometry: &GridGeometry,
    ) -> Vec<HighlightCellInfo> {
        let Some((first, last)) = self.clip(start.date(), end.date().max(start.date())) else {
            return Vec::new();
        };

        let mut cells: Vec<HighlightCellInfo> = first
            .iter_days()
            .take_while(|date| *date <= last)
            .filter_map(|date| {
                let (row, column) = self.position_of(date)?;
                Some(HighlightCellInfo {
                    date,
                    cell_index: row * 7 + column,
                    week_row_index: row,
                    bounds: geometry.cell_rect(row, column),
                    is_first: false,
                    is_last: false,
                })
            })
            .collect();

        if let Some(first_cell) = cells.first_mut() {
            first_cell.is_first = true;
        }
        if let Some(last_cell) = cells.last_mut() {
            last_cell.is_last = true;
        }
        cells
    }
}

fn days_in_month(first_of_month: NaiveDate) -> i64 {
    let next_month = if first_of_month.month() == 12 {
        NaiveDate::from_ymd_opt(first_of_month.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first_of_month.year(), first_of_month.month() + 1, 1)
    };
    next_month.map_or(31, |next| days_between(first_of_month, next))
}

/// Screen placement of the month grid cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Top-left corner of cell (0, 0)
    pub origin: Pos2,
    pub cell_size: Vec2,
    /// Gap between adjacent cells
    pub spacing: f32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            origin: Pos2::ZERO,
            cell_size: Vec2::new(100.0, 80.0),
            spacing: 2.0,
        }
    }
}

impl GridGeometry {
    pub fn cell_rect(&self, week_row_index: usize, column: usize) -> Rect {
        let min = self.origin
            + Vec2::new(
                column as f32 * (self.cell_size.x + self.spacing),
                week_row_index as f32 * (self.cell_size.y + self.spacing),
            );
        Rect::from_min_size(min, self.cell_size)
    }
}

/// Month view drop target: a proposal is valid while it is well-formed and
/// at least partly visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthTarget {
    pub grid: MonthGrid,
    pub geometry: GridGeometry,
}

impl MonthTarget {
    pub fn new(grid: MonthGrid, geometry: GridGeometry) -> Self {
        Self { grid, geometry }
    }
}

impl InteractionTarget for MonthTarget {
    fn highlight_cells(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<HighlightCellInfo> {
        self.grid.highlight_cells(start, end, &self.geometry)
    }

    fn is_valid(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start <= end && self.grid.clip(start.date(), end.date()).is_some()
    }
}
