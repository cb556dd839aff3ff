//! Date-bucketing and aggregation engine.
//!
//! # Responsibility
//! - Turn raw completion instants into calendar-day windows, counts,
//!   streaks and intensity ordinals for the presentation layer.
//! - Stay a pure, read-only transform: no state, no caching, no clock.
//!
//! # Invariants
//! - A window is computed against one reference instant; "today" never
//!   shifts between buckets of the same construction.
//! - Instants the engine cannot map to a calendar day abort the computation
//!   instead of silently reading as missed days.

pub mod aggregate;
pub mod window;
