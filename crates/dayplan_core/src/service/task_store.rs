//! Task store: hour-to-task state and its persistence/reset policy.
//!
//! # Responsibility
//! - Own the in-memory hour-to-task mapping for the current day.
//! - Serialize the full map to its JSON slot after every mutation.
//! - Apply the daily-reset rule against the persisted day marker.
//!
//! # Invariants
//! - A stored record's text is never empty after trimming; committing empty
//!   text deletes the record instead.
//! - The map is only ever valid for exactly one day marker; a marker
//!   mismatch clears it before any further read.
//! - Loading never fails hard: missing or malformed persisted state degrades
//!   to an empty map, while write failures surface as errors.

use crate::model::task::{TaskMap, TaskRecord, MAX_HOUR};
use crate::repo::slot_repo::{RepoError, SlotRepository, DAY_MARKER_SLOT_KEY, TASKS_SLOT_KEY};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for task mutations and persistence writes.
#[derive(Debug)]
pub enum StoreError {
    /// Slot key outside `[0, 23]`.
    HourOutOfRange(u8),
    /// Task map could not be encoded to its JSON blob.
    Encode(serde_json::Error),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HourOutOfRange(hour) => {
                write!(f, "hour {hour} is outside the valid range 0..=23")
            }
            Self::Encode(err) => write!(f, "failed to encode task map: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::HourOutOfRange(_) => None,
            Self::Encode(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Owns the task map and persists it through a slot repository.
pub struct TaskStore<R: SlotRepository> {
    repo: R,
    tasks: TaskMap,
}

impl<R: SlotRepository> TaskStore<R> {
    /// Creates an empty store over the provided repository.
    ///
    /// Call [`TaskStore::load`] before reading to pick up persisted state.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            tasks: TaskMap::new(),
        }
    }

    /// Loads the persisted task map and returns the stored day marker.
    ///
    /// Fails soft: a missing slot, a malformed blob or a read error all
    /// degrade to an empty map and a logged warning. Records that violate
    /// model invariants (empty text, out-of-day hour) are dropped rather
    /// than surfaced.
    pub fn load(&mut self) -> Option<String> {
        self.tasks = match self.repo.get_slot(TASKS_SLOT_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<TaskMap>(&blob) {
                Ok(map) => map,
                Err(err) => {
                    warn!(
                        "event=store_load module=store status=recovered error_code=malformed_tasks error={err}"
                    );
                    TaskMap::new()
                }
            },
            Ok(None) => TaskMap::new(),
            Err(err) => {
                warn!(
                    "event=store_load module=store status=recovered error_code=slot_read_failed error={err}"
                );
                TaskMap::new()
            }
        };

        self.tasks
            .retain(|hour, record| *hour <= MAX_HOUR && !record.text.trim().is_empty());

        info!(
            "event=store_load module=store status=ok tasks={}",
            self.tasks.len()
        );
        self.load_day_marker()
    }

    /// Serializes and persists the full map, overwriting prior state.
    pub fn save(&self) -> StoreResult<()> {
        let blob = serde_json::to_string(&self.tasks)?;
        self.repo.set_slot(TASKS_SLOT_KEY, &blob)?;
        Ok(())
    }

    /// Reads the persisted day marker; read failures degrade to `None`.
    pub fn load_day_marker(&self) -> Option<String> {
        match self.repo.get_slot(DAY_MARKER_SLOT_KEY) {
            Ok(marker) => marker.filter(|value| !value.trim().is_empty()),
            Err(err) => {
                warn!(
                    "event=marker_load module=store status=recovered error_code=slot_read_failed error={err}"
                );
                None
            }
        }
    }

    /// Persists the day marker the current map is valid for.
    pub fn save_day_marker(&self, marker: &str) -> StoreResult<()> {
        self.repo.set_slot(DAY_MARKER_SLOT_KEY, marker)?;
        Ok(())
    }

    /// Clears the map when `today` differs from the stored marker.
    ///
    /// On a mismatch the empty map and the new marker are both persisted and
    /// `true` is returned so the caller rebuilds its view. With a matching
    /// marker nothing is touched and `false` is returned, which makes the
    /// check idempotent per day.
    pub fn check_and_apply_daily_reset(&mut self, today: &str) -> StoreResult<bool> {
        if self.load_day_marker().as_deref() == Some(today) {
            return Ok(false);
        }

        self.tasks.clear();
        self.save()?;
        self.save_day_marker(today)?;
        info!("event=daily_reset module=store status=ok marker={today}");
        Ok(true)
    }

    /// Creates or updates the record at `hour` from user-entered text.
    ///
    /// Trimmed non-empty text updates `text` while preserving the existing
    /// `completed` flag; empty-after-trim text deletes any record instead.
    /// Persists afterward.
    pub fn set_task(&mut self, hour: u8, text: &str) -> StoreResult<()> {
        check_hour(hour)?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.tasks.remove(&hour);
        } else if let Some(record) = self.tasks.get_mut(&hour) {
            record.text = trimmed.to_string();
        } else {
            self.tasks.insert(hour, TaskRecord::new(trimmed));
        }

        self.save()
    }

    /// Removes the record at `hour` if present; absence is a no-op.
    pub fn delete_task(&mut self, hour: u8) -> StoreResult<()> {
        check_hour(hour)?;
        self.tasks.remove(&hour);
        self.save()
    }

    /// Flips the completion flag of the record at `hour`.
    ///
    /// Returns `Ok(None)` without persisting when no record exists (guarded
    /// no-op), otherwise persists and returns the new completed state.
    pub fn toggle_complete(&mut self, hour: u8) -> StoreResult<Option<bool>> {
        check_hour(hour)?;

        let completed = match self.tasks.get_mut(&hour) {
            Some(record) => {
                record.completed = !record.completed;
                record.completed
            }
            None => return Ok(None),
        };

        self.save()?;
        Ok(Some(completed))
    }

    /// Empties the map and persists the empty state.
    pub fn clear_all(&mut self) -> StoreResult<()> {
        self.tasks.clear();
        self.save()
    }

    pub fn task(&self, hour: u8) -> Option<&TaskRecord> {
        self.tasks.get(&hour)
    }

    pub fn tasks(&self) -> &TaskMap {
        &self.tasks
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

fn check_hour(hour: u8) -> StoreResult<()> {
    if hour > MAX_HOUR {
        return Err(StoreError::HourOutOfRange(hour));
    }
    Ok(())
}
