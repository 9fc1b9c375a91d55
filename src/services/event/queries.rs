use anyhow::{Context, Result};
use chrono::NaiveDateTime;

use super::EventSource;
use crate::ui_egui::views::{
    calculate_layouts_in, calculate_month_layout, MonthGrid, MultiDayEventLayout,
    WeekEventLayoutFrame,
};

/// First and last instant shown by `grid`
fn grid_window(grid: &MonthGrid) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start = grid.first_date().and_hms_opt(0, 0, 0)?;
    let end = grid.last_date().and_hms_opt(23, 59, 59)?;
    Some((start, end))
}

/// Query the events visible in `grid` and segment the multi-day ones.
pub fn load_multi_day_layouts(
    source: &dyn EventSource,
    grid: &MonthGrid,
) -> Result<Vec<MultiDayEventLayout>> {
    let Some((start, end)) = grid_window(grid) else {
        return Ok(Vec::new());
    };

    let events = source
        .events_intersecting(start, end)
        .with_context(|| format!("Failed to load events for {} - {}", start, end))?;
    log::debug!("Loaded {} events for grid starting {}", events.len(), grid.first_date());

    Ok(calculate_layouts_in(&events, grid))
}

/// Packed week frames for every row of `grid`.
pub fn load_month_layouts(
    source: &dyn EventSource,
    grid: &MonthGrid,
) -> Result<Vec<WeekEventLayoutFrame>> {
    let layouts = load_multi_day_layouts(source, grid)?;
    Ok(calculate_month_layout(&layouts, grid))
}
