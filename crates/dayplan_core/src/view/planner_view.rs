//! Ordered row view-models over store state.
//!
//! # Responsibility
//! - Materialize one `SlotRow` per hour in the configured range.
//! - Rebuild rows after structural changes; patch rows in place for
//!   completion toggles and temporal refreshes.
//!
//! # Invariants
//! - `rows` always holds exactly one row per hour of the range, ascending.
//! - A rebuild drops any in-progress `Editing` state.

use crate::clock::format_hour_12h;
use crate::model::task::{HourRange, TaskMap, TemporalClass};
use crate::view::slot::SlotState;

/// Render-ready view-model for one hour row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRow {
    /// Hour-of-day key in 24-hour form.
    pub hour: u8,
    /// 12-hour AM/PM display label.
    pub label: String,
    /// Committed task text, if any.
    pub text: Option<String>,
    /// Completion flag; only meaningful when `text` is present.
    pub completed: bool,
    /// Past/present/future relative to the last refresh.
    pub temporal: TemporalClass,
    /// Slot interaction state.
    pub state: SlotState,
}

/// Ordered sequence of slot rows for the configured hour range.
#[derive(Debug)]
pub struct PlannerView {
    range: HourRange,
    rows: Vec<SlotRow>,
}

impl PlannerView {
    /// Creates a view with no materialized rows; call `rebuild` before use.
    pub fn new(range: HourRange) -> Self {
        Self {
            range,
            rows: Vec::with_capacity(range.len()),
        }
    }

    pub fn range(&self) -> HourRange {
        self.range
    }

    pub fn rows(&self) -> &[SlotRow] {
        &self.rows
    }

    pub fn row(&self, hour: u8) -> Option<&SlotRow> {
        self.rows.iter().find(|row| row.hour == hour)
    }

    /// Rebuilds every row from scratch out of store state.
    ///
    /// Used after structural changes (init, day reset, clear-all, delete,
    /// text commit) since record presence and text change row content.
    pub fn rebuild(&mut self, tasks: &TaskMap, current_hour: u8) {
        self.rows = self
            .range
            .hours()
            .map(|hour| {
                let record = tasks.get(&hour);
                SlotRow {
                    hour,
                    label: format_hour_12h(hour),
                    text: record.map(|r| r.text.clone()),
                    completed: record.is_some_and(|r| r.completed),
                    temporal: TemporalClass::of(hour, current_hour),
                    state: SlotState::initial(record.is_some()),
                }
            })
            .collect();
    }

    /// Recomputes only the temporal class of each row.
    ///
    /// Called on every periodic tick; never touches task content, so a full
    /// rebuild is avoided while the current hour moves.
    pub fn refresh_temporal_class(&mut self, current_hour: u8) {
        for row in &mut self.rows {
            row.temporal = TemporalClass::of(row.hour, current_hour);
        }
    }

    /// Puts the row at `hour` into the `Editing` state.
    ///
    /// Returns `false` when the hour is outside the range or the row is
    /// already being edited.
    pub fn begin_edit(&mut self, hour: u8) -> bool {
        match self.row_mut(hour) {
            Some(row) if row.state != SlotState::Editing => {
                row.state = SlotState::Editing;
                true
            }
            _ => false,
        }
    }

    /// Patches a row's completion flag in place after a toggle.
    pub fn set_row_completed(&mut self, hour: u8, completed: bool) {
        if let Some(row) = self.row_mut(hour) {
            row.completed = completed;
        }
    }

    fn row_mut(&mut self, hour: u8) -> Option<&mut SlotRow> {
        self.rows.iter_mut().find(|row| row.hour == hour)
    }
}
