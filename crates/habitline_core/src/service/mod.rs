//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and report calls into use-case level APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod habit_service;
