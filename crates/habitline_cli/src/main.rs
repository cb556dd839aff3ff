//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise `habitline_core` end to end against an in-memory store.
//! - Keep output deterministic for quick local sanity checks.

use habitline_core::db::open_db_in_memory;
use habitline_core::{
    default_log_level, init_logging, CreateHabitRequest, HabitService, SqliteHabitRepository,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let log_dir = std::env::temp_dir().join("habitline-logs");
    init_logging(default_log_level(), &log_dir.display().to_string())?;

    println!("habitline_core version={}", habitline_core::core_version());

    let conn = open_db_in_memory()?;
    let service = HabitService::new(SqliteHabitRepository::new(&conn));

    let id = service.create_habit(&CreateHabitRequest {
        title: "Morning stretch".to_string(),
        description: Some("Five minutes before coffee".to_string()),
    })?;
    service.complete_today(id)?;

    let report = service.overview_today()?;
    println!(
        "habits={} total_completions={} active_days={} current_streak={}",
        service.list_habits()?.len(),
        report.total_completions,
        report.active_days,
        report.current_streak
    );

    Ok(())
}
