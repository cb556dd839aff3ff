//! Persistence layer for habit records.
//!
//! # Responsibility
//! - Provide repository contracts plus the SQLite implementation.
//! - Keep SQL details inside the core persistence boundary.

pub mod habit_repo;
