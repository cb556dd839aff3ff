//! Calendar-day keys and trailing window construction.
//!
//! # Responsibility
//! - Normalize epoch-millisecond instants to local calendar days.
//! - Build fixed-length day windows ending at the reference instant's day.
//!
//! # Invariants
//! - Two instants share a `DayKey` iff they fall on the same local date.
//! - Windows are oldest-first, exactly `length` cells, last cell = today.
//! - All normalization uses the process-local timezone; instants produced
//!   under a different timezone are not reconciled.

use chrono::{Datelike, Days, Local, NaiveDate, TimeZone};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Canonical identifier for one local calendar day, time-of-day stripped.
///
/// `NaiveDate` is `Eq + Ord + Hash`, so keys compare directly and serve as
/// map keys.
pub type DayKey = NaiveDate;

/// Window length of the weekly bar chart.
pub const WEEK_WINDOW_DAYS: usize = 7;

/// Window length of the per-habit and aggregate heatmaps.
pub const MONTH_WINDOW_DAYS: usize = 30;

/// Result type for report APIs.
pub type ReportResult<T> = Result<T, ReportError>;

/// Report-layer error for inputs the engine refuses to interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Instant cannot be mapped to a local calendar day (out of the
    /// representable range). Surfaced instead of rendering a false gap.
    InvalidInstant { instant_ms: i64 },
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInstant { instant_ms } => {
                write!(f, "instant {instant_ms}ms has no local calendar day")
            }
        }
    }
}

impl Error for ReportError {}

/// Maps an instant to the local calendar day it falls on.
pub fn day_key(instant_ms: i64) -> ReportResult<DayKey> {
    Local
        .timestamp_millis_opt(instant_ms)
        .single()
        .map(|instant| instant.date_naive())
        .ok_or(ReportError::InvalidInstant { instant_ms })
}

/// One day slot within a trailing window, before activity annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    /// Calendar day this cell covers. Serializes as `YYYY-MM-DD`.
    pub key: DayKey,
    /// Ordinal day of month, 1-31.
    pub day_of_month: u32,
    /// Short month label, "Jan".."Dec".
    pub month_label: String,
    /// Whether this cell is the window's reference day.
    pub is_today: bool,
}

/// Builds a trailing window of `length` consecutive days ending at the day
/// of `now_ms`, oldest first.
///
/// Pure in `now_ms`: the same reference instant yields an identical window.
pub fn build_window(now_ms: i64, length: usize) -> ReportResult<Vec<DayCell>> {
    let today = day_key(now_ms)?;
    let mut cells = Vec::with_capacity(length);

    for back in (0..length).rev() {
        let key = today
            .checked_sub_days(Days::new(back as u64))
            .ok_or(ReportError::InvalidInstant { instant_ms: now_ms })?;
        cells.push(DayCell {
            key,
            day_of_month: key.day(),
            month_label: key.format("%b").to_string(),
            is_today: key == today,
        });
    }

    Ok(cells)
}

pub(crate) const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Index of the day's weekday with Sunday = 0, matching chart axis order.
pub fn weekday_index(key: DayKey) -> usize {
    key.weekday().num_days_from_sunday() as usize
}

/// Short weekday label, "Sun".."Sat".
pub fn weekday_label(key: DayKey) -> &'static str {
    WEEKDAY_LABELS[weekday_index(key)]
}
