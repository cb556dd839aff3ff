//! Completion bucketing, streak and intensity computation.
//!
//! # Responsibility
//! - Bucket completion instants into day windows, per habit and across all
//!   habits.
//! - Derive counts, completion rates, trailing streaks and intensity
//!   ordinals from bucketed windows.
//!
//! # Invariants
//! - Inputs are never mutated; every function recomputes from scratch.
//! - Same-day duplicate completions are counted as found in the data, even
//!   though the store keeps at most one per day.
//! - Empty habit or completion lists are valid and yield all-zero output.

use crate::model::habit::Habit;
use crate::report::window::{
    build_window, day_key, weekday_index, weekday_label, DayCell, DayKey, ReportResult,
    MONTH_WINDOW_DAYS, WEEK_WINDOW_DAYS,
};
use serde::Serialize;
use std::collections::HashMap;

/// One window day annotated with a single habit's activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitDay {
    pub cell: DayCell,
    /// Completions recorded on this day for the habit.
    pub count: u32,
}

impl HabitDay {
    /// Whether the habit was completed at least once on this day.
    pub fn completed(&self) -> bool {
        self.count > 0
    }
}

/// One window day annotated with activity across all habits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewDay {
    pub cell: DayCell,
    /// Number of habits completed on this day, one per habit at most.
    pub completion_count: u32,
    /// Titles of the habits completed on this day, in input habit order.
    pub completed_titles: Vec<String>,
}

/// Annotates a window with one habit's per-day completion counts.
///
/// Idempotent: the same `(completions, window)` pair always produces the
/// same output. Every instant is normalized, so an unmappable completion
/// fails the whole call even when it lies outside the window.
pub fn bucket_habit(completions: &[i64], window: &[DayCell]) -> ReportResult<Vec<HabitDay>> {
    let counts = day_counts(completions)?;

    Ok(window
        .iter()
        .map(|cell| HabitDay {
            count: counts.get(&cell.key).copied().unwrap_or(0),
            cell: cell.clone(),
        })
        .collect())
}

/// Annotates a window with cross-habit activity.
///
/// A habit contributes at most one count per day regardless of how many
/// instants normalize to that day; titles keep the iteration order of
/// `habits`.
pub fn bucket_all(habits: &[Habit], window: &[DayCell]) -> ReportResult<Vec<OverviewDay>> {
    let per_habit_days = habits
        .iter()
        .map(|habit| day_counts(&habit.completions))
        .collect::<ReportResult<Vec<_>>>()?;

    Ok(window
        .iter()
        .map(|cell| {
            let mut completion_count = 0;
            let mut completed_titles = Vec::new();
            for (habit, days) in habits.iter().zip(&per_habit_days) {
                if days.contains_key(&cell.key) {
                    completion_count += 1;
                    completed_titles.push(habit.title.clone());
                }
            }
            OverviewDay {
                cell: cell.clone(),
                completion_count,
                completed_titles,
            }
        })
        .collect())
}

/// Ordinal visual weight for a day's completion count.
///
/// Monotonic in `count`, saturating at 4. Returns an ordinal rather than a
/// color so the engine stays render-agnostic.
pub fn intensity(count: u32) -> u8 {
    count.min(4) as u8
}

/// Trailing streak: consecutive active days ending at the most recent day.
///
/// `activity` is consumed oldest-first, matching window order; the scan runs
/// from the back and stops at the first inactive day. An inactive final day
/// yields 0 no matter what precedes it.
pub fn current_streak<I>(activity: I) -> u32
where
    I: IntoIterator<Item = bool>,
    I::IntoIter: DoubleEndedIterator,
{
    activity.into_iter().rev().take_while(|active| *active).count() as u32
}

/// 30-day per-habit calendar view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitHeatmap {
    pub days: Vec<HabitDay>,
    /// Days in the window with at least one completion.
    pub completed_days: u32,
    /// `completed_days / window length`, rounded to the nearest percent.
    pub completion_rate_percent: u32,
}

/// Builds the 30-day heatmap for one habit's completion history.
pub fn habit_heatmap(completions: &[i64], now_ms: i64) -> ReportResult<HabitHeatmap> {
    let window = build_window(now_ms, MONTH_WINDOW_DAYS)?;
    let days = bucket_habit(completions, &window)?;
    let completed_days = days.iter().filter(|day| day.completed()).count() as u32;

    Ok(HabitHeatmap {
        completion_rate_percent: rate_percent(completed_days, days.len()),
        days,
        completed_days,
    })
}

/// One bar of the weekly chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekChartDay {
    pub cell: DayCell,
    /// Axis label, "Sun".."Sat".
    pub weekday: &'static str,
    pub count: u32,
}

/// 7-day per-habit bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekChart {
    pub days: Vec<WeekChartDay>,
    /// Sum of the seven per-day counts.
    pub week_total: u32,
}

/// Builds the 7-day chart for one habit's completion history.
///
/// Counts are per day, not booleans: duplicate same-day instants in legacy
/// data show up here instead of being masked.
pub fn week_chart(completions: &[i64], now_ms: i64) -> ReportResult<WeekChart> {
    let window = build_window(now_ms, WEEK_WINDOW_DAYS)?;
    let days: Vec<WeekChartDay> = bucket_habit(completions, &window)?
        .into_iter()
        .map(|day| WeekChartDay {
            weekday: weekday_label(day.cell.key),
            count: day.count,
            cell: day.cell,
        })
        .collect();
    let week_total = days.iter().map(|day| day.count).sum();

    Ok(WeekChart { days, week_total })
}

/// 30-day aggregate view across all habits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub days: Vec<OverviewDay>,
    /// Sum of `completion_count` over the window.
    pub total_completions: u32,
    /// Days in the window with any activity.
    pub active_days: u32,
    /// Trailing streak of active days ending today.
    pub current_streak: u32,
}

/// Builds the 30-day aggregate overview for the given habits.
///
/// Habit iteration order fixes the order of per-day title lists, so callers
/// should pass a deterministically ordered list.
pub fn overview(habits: &[Habit], now_ms: i64) -> ReportResult<Overview> {
    let window = build_window(now_ms, MONTH_WINDOW_DAYS)?;
    let days = bucket_all(habits, &window)?;
    let total_completions = days.iter().map(|day| day.completion_count).sum();
    let active_days = days.iter().filter(|day| day.completion_count > 0).count() as u32;
    let streak = current_streak(days.iter().map(|day| day.completion_count > 0));

    Ok(Overview {
        days,
        total_completions,
        active_days,
        current_streak: streak,
    })
}

/// Counts all completions grouped by weekday, Sunday first.
///
/// Unlike the windowed views this spans the habit's entire history.
pub fn weekday_histogram(completions: &[i64]) -> ReportResult<[u32; 7]> {
    let mut counts = [0u32; 7];
    for &instant in completions {
        counts[weekday_index(day_key(instant)?)] += 1;
    }
    Ok(counts)
}

fn rate_percent(completed: u32, window_len: usize) -> u32 {
    if window_len == 0 {
        return 0;
    }
    ((f64::from(completed) / window_len as f64) * 100.0).round() as u32
}

fn day_counts(completions: &[i64]) -> ReportResult<HashMap<DayKey, u32>> {
    let mut counts = HashMap::with_capacity(completions.len());
    for &instant in completions {
        *counts.entry(day_key(instant)?).or_insert(0u32) += 1;
    }
    Ok(counts)
}
