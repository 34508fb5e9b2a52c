//! Domain model for the hourly planner.
//!
//! # Responsibility
//! - Define the per-hour task record and its persisted JSON shape.
//! - Define the display window and temporal classification rules.
//!
//! # Invariants
//! - Every slot is addressed by an hour-of-day key in `[0, 23]`.
//! - Absence of a record means "no task this hour"; no empty placeholders.

pub mod task;
