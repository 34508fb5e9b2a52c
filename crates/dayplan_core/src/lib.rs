//! Core domain logic for the day planner.
//! This crate is the single source of truth for slot and daily-reset invariants.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use clock::{format_full_date, format_hour_12h, Clock, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{HourRange, HourRangeError, TaskMap, TaskRecord, TemporalClass, MAX_HOUR};
pub use repo::slot_repo::{
    MemorySlotRepository, RepoError, RepoResult, SlotRepository, SqliteSlotRepository,
    DAY_MARKER_SLOT_KEY, TASKS_SLOT_KEY,
};
pub use service::planner::{Planner, ViewEffect};
pub use service::task_store::{StoreError, StoreResult, TaskStore};
pub use view::planner_view::{PlannerView, SlotRow};
pub use view::slot::{SlotEvent, SlotState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
