//! Task slot domain model.
//!
//! # Responsibility
//! - Define the canonical record attached to an hour slot.
//! - Define the inclusive display window and its validation rules.
//! - Classify slots as past/present/future relative to the current hour.
//!
//! # Invariants
//! - A persisted `TaskRecord.text` is never empty or whitespace-only; the
//!   store enforces this on every write (empty text means delete).
//! - `HourRange` bounds are inclusive, within `[0, 23]`, start <= end.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Largest valid hour-of-day slot key.
pub const MAX_HOUR: u8 = 23;

/// One task attached to one hour slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Trimmed task text. Never empty for a committed record.
    pub text: String,
    /// Completion flag toggled by the user.
    #[serde(default)]
    pub completed: bool,
}

impl TaskRecord {
    /// Creates an incomplete record from already-trimmed text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

/// Hour-of-day to task mapping for the current day.
///
/// Serializes to a JSON object keyed by the hour number in string form
/// (`{"14":{"text":"...","completed":false}}`), which is the persisted blob
/// contract shared with the slot storage layer. Display order is derived
/// from the configured `HourRange`, not from map order.
pub type TaskMap = BTreeMap<u8, TaskRecord>;

/// Validation error for display window construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourRangeError {
    /// An hour bound lies outside `[0, 23]`.
    HourOutOfDay(u8),
    /// `start_hour` is greater than `end_hour`.
    InvertedRange { start_hour: u8, end_hour: u8 },
}

impl Display for HourRangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HourOutOfDay(hour) => {
                write!(f, "hour {hour} is outside the valid range 0..=23")
            }
            Self::InvertedRange {
                start_hour,
                end_hour,
            } => write!(
                f,
                "start hour {start_hour} must not be after end hour {end_hour}"
            ),
        }
    }
}

impl Error for HourRangeError {}

/// Inclusive window of hours displayed by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourRange {
    start_hour: u8,
    end_hour: u8,
}

impl HourRange {
    /// Creates a validated inclusive display window.
    pub fn new(start_hour: u8, end_hour: u8) -> Result<Self, HourRangeError> {
        if start_hour > MAX_HOUR {
            return Err(HourRangeError::HourOutOfDay(start_hour));
        }
        if end_hour > MAX_HOUR {
            return Err(HourRangeError::HourOutOfDay(end_hour));
        }
        if start_hour > end_hour {
            return Err(HourRangeError::InvertedRange {
                start_hour,
                end_hour,
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u8 {
        self.end_hour
    }

    /// Iterates the displayed hours in ascending order.
    pub fn hours(&self) -> impl Iterator<Item = u8> {
        self.start_hour..=self.end_hour
    }

    pub fn contains(&self, hour: u8) -> bool {
        hour >= self.start_hour && hour <= self.end_hour
    }

    /// Number of displayed slots.
    pub fn len(&self) -> usize {
        usize::from(self.end_hour - self.start_hour) + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for HourRange {
    /// The 8 AM to 8 PM working-day window.
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 20,
        }
    }
}

/// Past/present/future classification of a slot relative to the current hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalClass {
    Past,
    Present,
    Future,
}

impl TemporalClass {
    /// Classifies `hour` against `current_hour`.
    ///
    /// Recomputed fresh on every call site; the current hour moves over time.
    pub fn of(hour: u8, current_hour: u8) -> Self {
        if hour < current_hour {
            Self::Past
        } else if hour == current_hour {
            Self::Present
        } else {
            Self::Future
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Past => "past",
            Self::Present => "present",
            Self::Future => "future",
        }
    }
}
