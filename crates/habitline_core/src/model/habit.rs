//! Habit domain model.
//!
//! # Responsibility
//! - Define the canonical habit record shared by store and report layers.
//! - Validate identity and title invariants on construction and mutation.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another habit.
//! - `title` is non-empty after trimming.
//! - `completions` hold epoch-millisecond instants; the store keeps at most
//!   one per local calendar day, but readers must not rely on that.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a tracked habit.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type HabitId = Uuid;

/// Validation failure raised before a habit reaches persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitValidationError {
    /// The nil UUID is reserved and never a valid identity.
    NilUuid,
    /// Title is empty or whitespace-only after trimming.
    EmptyTitle,
}

impl Display for HabitValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "habit uuid must not be nil"),
            Self::EmptyTitle => write!(f, "habit title must not be empty"),
        }
    }
}

impl Error for HabitValidationError {}

/// Canonical record for one tracked habit.
///
/// Completion instants are appended by the store's complete operation and
/// are otherwise opaque to this type; all calendar semantics live in the
/// report layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Stable global ID used for linking and auditing.
    pub uuid: HabitId,
    /// Short display name. Non-empty after trimming.
    pub title: String,
    /// Optional free-form text. Empty string when absent.
    pub description: String,
    /// Unix epoch milliseconds, set once at creation.
    pub created_at: i64,
    /// Unix epoch milliseconds, one entry per recorded completion.
    pub completions: Vec<i64>,
}

impl Habit {
    /// Creates a new habit with a generated stable ID.
    ///
    /// Title and description are stored trimmed.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        created_at: i64,
    ) -> Result<Self, HabitValidationError> {
        Self::with_id(Uuid::new_v4(), title, description, created_at)
    }

    /// Creates a habit with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        uuid: HabitId,
        title: impl Into<String>,
        description: impl Into<String>,
        created_at: i64,
    ) -> Result<Self, HabitValidationError> {
        let habit = Self {
            uuid,
            title: title.into().trim().to_string(),
            description: description.into().trim().to_string(),
            created_at,
            completions: Vec::new(),
        };
        habit.validate()?;
        Ok(habit)
    }

    /// Checks record invariants.
    ///
    /// Write paths must call this before any SQL mutation, since fields are
    /// public and may have been edited after construction.
    pub fn validate(&self) -> Result<(), HabitValidationError> {
        if self.uuid.is_nil() {
            return Err(HabitValidationError::NilUuid);
        }
        if self.title.trim().is_empty() {
            return Err(HabitValidationError::EmptyTitle);
        }
        Ok(())
    }
}
