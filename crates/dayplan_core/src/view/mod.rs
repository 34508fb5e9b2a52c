//! Planner view layer, independent of any rendering technology.
//!
//! # Responsibility
//! - Model each hour row as an explicit slot state machine.
//! - Derive ordered row view-models from store state and the current hour.
//!
//! # Invariants
//! - Row order always follows the configured hour range, never map order.
//! - Temporal classes are recomputed fresh from the current hour; row
//!   content is only touched by structural rebuilds.

pub mod planner_view;
pub mod slot;
