//! Habit repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and completion APIs over habit storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Habit::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `add_completion` is a single conditional insert, so two writers racing
//!   on the same day cannot both record a completion.

use crate::db::DbError;
use crate::model::habit::{Habit, HabitId, HabitValidationError};
use crate::report::window::{day_key, ReportError};
use log::info;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const HABIT_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    description,
    created_at
FROM habits";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for habit persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(HabitValidationError),
    Db(DbError),
    /// A completion instant could not be normalized to a calendar day.
    Report(ReportError),
    NotFound(HabitId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Report(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "habit not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted habit data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Report(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<HabitValidationError> for RepoError {
    fn from(value: HabitValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<ReportError> for RepoError {
    fn from(value: ReportError) -> Self {
        Self::Report(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Result of recording a completion for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// A new completion row was inserted.
    Recorded,
    /// The habit already had a completion on that day; nothing changed.
    AlreadyCompleted,
}

/// Repository interface for habit CRUD and completion operations.
///
/// Completion rows are appended only through [`add_completion`]; `create_habit`
/// persists the habit record alone.
///
/// [`add_completion`]: HabitRepository::add_completion
pub trait HabitRepository {
    fn create_habit(&self, habit: &Habit) -> RepoResult<HabitId>;
    fn get_habit(&self, id: HabitId) -> RepoResult<Option<Habit>>;
    /// Lists all habits, newest-created first.
    fn list_habits(&self) -> RepoResult<Vec<Habit>>;
    /// Removes the habit record and all of its completions.
    fn delete_habit(&self, id: HabitId) -> RepoResult<()>;
    /// Records a completion for the calendar day of `instant_ms`,
    /// idempotently per day.
    fn add_completion(&self, id: HabitId, instant_ms: i64) -> RepoResult<CompletionOutcome>;
}

/// SQLite-backed habit repository.
pub struct SqliteHabitRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHabitRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn habit_exists(&self, id: HabitId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM habits WHERE uuid = ?1);",
            [id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn load_completions(&self, id: HabitId) -> RepoResult<Vec<i64>> {
        let mut stmt = self.conn.prepare(
            "SELECT completed_at FROM completions WHERE habit_uuid = ?1 ORDER BY day ASC;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        let mut completions = Vec::new();

        while let Some(row) = rows.next()? {
            completions.push(row.get(0)?);
        }

        Ok(completions)
    }
}

impl HabitRepository for SqliteHabitRepository<'_> {
    fn create_habit(&self, habit: &Habit) -> RepoResult<HabitId> {
        habit.validate()?;

        self.conn.execute(
            "INSERT INTO habits (uuid, title, description, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                habit.uuid.to_string(),
                habit.title.as_str(),
                habit.description.as_str(),
                habit.created_at,
            ],
        )?;

        info!(
            "event=habit_create module=repo status=ok habit={}",
            habit.uuid
        );
        Ok(habit.uuid)
    }

    fn get_habit(&self, id: HabitId) -> RepoResult<Option<Habit>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{HABIT_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            let mut habit = parse_habit_row(row)?;
            habit.completions = self.load_completions(habit.uuid)?;
            return Ok(Some(habit));
        }

        Ok(None)
    }

    fn list_habits(&self) -> RepoResult<Vec<Habit>> {
        let mut stmt = self.conn.prepare(&format!(
            "{HABIT_SELECT_SQL} ORDER BY created_at DESC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut habits = Vec::new();

        while let Some(row) = rows.next()? {
            habits.push(parse_habit_row(row)?);
        }
        for habit in &mut habits {
            habit.completions = self.load_completions(habit.uuid)?;
        }

        Ok(habits)
    }

    fn delete_habit(&self, id: HabitId) -> RepoResult<()> {
        // Completion rows go with the habit via ON DELETE CASCADE.
        let changed = self
            .conn
            .execute("DELETE FROM habits WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        info!("event=habit_delete module=repo status=ok habit={id}");
        Ok(())
    }

    fn add_completion(&self, id: HabitId, instant_ms: i64) -> RepoResult<CompletionOutcome> {
        if !self.habit_exists(id)? {
            return Err(RepoError::NotFound(id));
        }

        let day = day_key(instant_ms)?;
        let changed = self.conn.execute(
            "INSERT INTO completions (habit_uuid, day, completed_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (habit_uuid, day) DO NOTHING;",
            params![
                id.to_string(),
                day.format("%Y-%m-%d").to_string(),
                instant_ms,
            ],
        )?;

        if changed == 0 {
            return Ok(CompletionOutcome::AlreadyCompleted);
        }

        info!("event=habit_complete module=repo status=ok habit={id} day={day}");
        Ok(CompletionOutcome::Recorded)
    }
}

fn parse_habit_row(row: &Row<'_>) -> RepoResult<Habit> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in habits.uuid"))
    })?;

    let habit = Habit {
        uuid,
        title: row.get("title")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        completions: Vec::new(),
    };
    habit.validate()?;
    Ok(habit)
}
