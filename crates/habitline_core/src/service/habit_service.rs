//! Habit use-case service.
//!
//! # Responsibility
//! - Provide the create/list/delete/complete/report entry points consumed
//!   by presentation layers.
//! - Delegate persistence to the repository and calendar math to the report
//!   engine.
//!
//! # Invariants
//! - Service APIs never bypass repository validation contracts.
//! - Report methods take an explicit reference instant; only the `*_today`
//!   conveniences read the wall clock.

use crate::model::habit::{Habit, HabitId};
use crate::repo::habit_repo::{CompletionOutcome, HabitRepository, RepoError, RepoResult};
use crate::report::aggregate::{
    habit_heatmap, overview, week_chart, weekday_histogram, HabitHeatmap, Overview, WeekChart,
};
use chrono::Utc;
use serde::Serialize;

/// Use-case service wrapper for habit operations.
pub struct HabitService<R: HabitRepository> {
    repo: R,
}

/// Request model for creating a habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateHabitRequest {
    /// Display name; must be non-empty after trimming.
    pub title: String,
    /// Optional free-form text.
    pub description: Option<String>,
}

/// Lifetime statistics for one habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitStats {
    pub total_completions: u32,
    /// Completion counts grouped by weekday, Sunday first.
    pub weekday_counts: [u32; 7],
    /// Raw completion instants, epoch milliseconds.
    pub completions: Vec<i64>,
}

impl<R: HabitRepository> HabitService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a habit from request input.
    ///
    /// # Contract
    /// - Title and description are trimmed before validation.
    /// - `created_at` is stamped from the wall clock, once.
    /// - Returns the created stable habit ID.
    pub fn create_habit(&self, request: &CreateHabitRequest) -> RepoResult<HabitId> {
        let habit = Habit::new(
            request.title.as_str(),
            request.description.as_deref().unwrap_or(""),
            wall_clock_ms(),
        )?;
        self.repo.create_habit(&habit)
    }

    /// Gets one habit by ID.
    pub fn get_habit(&self, id: HabitId) -> RepoResult<Option<Habit>> {
        self.repo.get_habit(id)
    }

    /// Lists all habits, newest-created first.
    pub fn list_habits(&self) -> RepoResult<Vec<Habit>> {
        self.repo.list_habits()
    }

    /// Deletes a habit and all of its completions.
    pub fn delete_habit(&self, id: HabitId) -> RepoResult<()> {
        self.repo.delete_habit(id)
    }

    /// Marks the habit complete for the current calendar day.
    ///
    /// Idempotent per day: repeated calls report `AlreadyCompleted`.
    pub fn complete_today(&self, id: HabitId) -> RepoResult<CompletionOutcome> {
        self.complete_on(id, wall_clock_ms())
    }

    /// Marks the habit complete for the calendar day of `instant_ms`.
    ///
    /// The deterministic variant of [`complete_today`] for tests and
    /// imports.
    ///
    /// [`complete_today`]: HabitService::complete_today
    pub fn complete_on(&self, id: HabitId, instant_ms: i64) -> RepoResult<CompletionOutcome> {
        self.repo.add_completion(id, instant_ms)
    }

    /// Returns lifetime statistics for one habit.
    pub fn habit_stats(&self, id: HabitId) -> RepoResult<HabitStats> {
        let habit = self.require_habit(id)?;
        let weekday_counts = weekday_histogram(&habit.completions)?;

        Ok(HabitStats {
            total_completions: habit.completions.len() as u32,
            weekday_counts,
            completions: habit.completions,
        })
    }

    /// Builds the 30-day heatmap for one habit.
    pub fn habit_heatmap(&self, id: HabitId, now_ms: i64) -> RepoResult<HabitHeatmap> {
        let habit = self.require_habit(id)?;
        Ok(habit_heatmap(&habit.completions, now_ms)?)
    }

    /// Builds the 7-day chart for one habit.
    pub fn week_chart(&self, id: HabitId, now_ms: i64) -> RepoResult<WeekChart> {
        let habit = self.require_habit(id)?;
        Ok(week_chart(&habit.completions, now_ms)?)
    }

    /// Builds the 30-day aggregate overview across all habits.
    ///
    /// Per-day title order follows the `list_habits()` order.
    pub fn overview(&self, now_ms: i64) -> RepoResult<Overview> {
        let habits = self.repo.list_habits()?;
        Ok(overview(&habits, now_ms)?)
    }

    /// [`overview`] against the current wall clock.
    ///
    /// [`overview`]: HabitService::overview
    pub fn overview_today(&self) -> RepoResult<Overview> {
        self.overview(wall_clock_ms())
    }

    fn require_habit(&self, id: HabitId) -> RepoResult<Habit> {
        self.repo.get_habit(id)?.ok_or(RepoError::NotFound(id))
    }
}

fn wall_clock_ms() -> i64 {
    Utc::now().timestamp_millis()
}
