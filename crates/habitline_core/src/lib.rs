//! Core domain logic for Habitline.
//! This crate is the single source of truth for habit-tracking invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod report;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::habit::{Habit, HabitId, HabitValidationError};
pub use repo::habit_repo::{
    CompletionOutcome, HabitRepository, RepoError, RepoResult, SqliteHabitRepository,
};
pub use report::aggregate::{
    bucket_all, bucket_habit, current_streak, habit_heatmap, intensity, overview, week_chart,
    weekday_histogram, HabitDay, HabitHeatmap, Overview, OverviewDay, WeekChart, WeekChartDay,
};
pub use report::window::{
    build_window, day_key, DayCell, DayKey, ReportError, ReportResult, MONTH_WINDOW_DAYS,
    WEEK_WINDOW_DAYS,
};
pub use service::habit_service::{CreateHabitRequest, HabitService, HabitStats};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
