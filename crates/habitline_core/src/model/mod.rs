//! Domain model for tracked habits.
//!
//! # Responsibility
//! - Define the canonical habit record used by core business logic.
//! - Enforce construction-time invariants before anything is persisted.
//!
//! # Invariants
//! - Every habit is identified by a stable `HabitId`.
//! - Deleting a habit removes the whole record; there are no tombstones.

pub mod habit;
