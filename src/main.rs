// Calendar layout tool
// Prints the multi-day bar layout of a month for a JSON file of events

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;

use calendar_interaction::models::event::CalendarEvent;
use calendar_interaction::services::event::{load_month_layouts, InMemoryEventStore};
use calendar_interaction::services::settings::SettingsService;
use calendar_interaction::ui_egui::views::{MonthGrid, WeekEventLayoutFrame};

#[derive(Parser, Debug)]
#[command(name = "calendar-layout")]
#[command(version, about = "Show how multi-day events stack in a month grid", long_about = None)]
struct Args {
    /// JSON file holding an array of events
    events: PathBuf,

    /// Any date inside the month to lay out (defaults to today)
    #[arg(short, long)]
    month: Option<NaiveDate>,

    /// First day of the week, 0 = Sunday .. 6 = Saturday (overrides the settings file)
    #[arg(short = 'w', long)]
    first_day_of_week: Option<u8>,

    /// Settings file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bars shown per day before collapsing into "+N more"
    #[arg(long, default_value = "3")]
    max_rows: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let service = match &args.config {
        Some(path) => SettingsService::new(path),
        None => SettingsService::from_default_location()?,
    };
    let mut settings = service.get()?;
    if let Some(first_day) = args.first_day_of_week {
        settings.first_day_of_week = first_day;
        settings.validate()?;
    }
    log::info!("Using settings from {}", service.path().display());

    let store = load_store(&args.events)?;
    let month = args.month.unwrap_or_else(|| Local::now().date_naive());
    let grid = MonthGrid::for_month_fixed(month, settings.first_day_of_week, settings.visible_weeks);

    let frames = load_month_layouts(&store, &grid)?;
    for frame in &frames {
        print_frame(frame, args.max_rows);
    }
    Ok(())
}

fn load_store(path: &Path) -> Result<InMemoryEventStore> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read events from {}", path.display()))?;
    let events: Vec<CalendarEvent> = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse events from {}", path.display()))?;

    let mut store = InMemoryEventStore::new();
    for event in events {
        store.insert(event)?;
    }
    log::debug!("Loaded {} events from {}", store.len(), path.display());
    Ok(store)
}

fn print_frame(frame: &WeekEventLayoutFrame, max_rows: usize) {
    let first = frame.week_dates[0];
    let last = frame.week_dates[6];
    println!(
        "Week {} ({} .. {}), {} row(s)",
        frame.week_row_index + 1,
        first,
        last,
        frame.total_rows
    );

    for assignment in frame.visible_assignments(max_rows) {
        let from = frame.week_dates[assignment.start_column];
        let to = frame.week_dates[assignment.end_column];
        let mut markers = Vec::new();
        if assignment.segment.is_first_segment {
            markers.push("starts");
        }
        if assignment.segment.is_last_segment {
            markers.push("ends");
        }
        println!(
            "  row {}  {} {} - {} {}  {} [{}]",
            assignment.row,
            from.format("%a"),
            from.format("%d"),
            to.format("%a"),
            to.format("%d"),
            assignment.event.title,
            markers.join(", ")
        );
    }

    let hidden: Vec<String> = (0..7)
        .filter_map(|column| {
            let count = frame.hidden_count(column, max_rows);
            (count > 0).then(|| format!("{} +{} more", frame.week_dates[column].format("%a"), count))
        })
        .collect();
    if !hidden.is_empty() {
        println!("  {}", hidden.join(", "));
    }
}
