//! Per-slot state machine.
//!
//! # Responsibility
//! - Define the three slot states and the discrete gestures driving them.
//!
//! # Invariants
//! - `Editing` is only reachable through an add/edit gesture and never
//!   survives a structural rebuild.
//! - Delete and complete gestures on an empty idle slot are guarded no-ops.

/// Interaction state of one hour row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// No task; shows the placeholder and an add gesture.
    IdleEmpty,
    /// Has a task; text is read-only, edit/complete/delete gestures active.
    IdleFilled,
    /// Text is being edited; only the save gesture commits.
    Editing,
}

impl SlotState {
    /// Initial state for a slot, derived from record presence.
    pub fn initial(has_record: bool) -> Self {
        if has_record {
            Self::IdleFilled
        } else {
            Self::IdleEmpty
        }
    }
}

/// Discrete user gesture targeting one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotEvent {
    /// Begin adding or editing the slot's task.
    AddEdit,
    /// Commit the entered text; empty-after-trim means delete.
    Save(String),
    /// Delete the slot's task.
    Delete,
    /// Flip the completion flag.
    ToggleComplete,
}
