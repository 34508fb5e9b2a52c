//! Planner control flow: init, tick and gesture routing.
//!
//! # Responsibility
//! - Compose store, view and clock into the startup/tick/mutate loop.
//! - Map slot gestures onto store mutations and the matching view effect.
//!
//! # Invariants
//! - Structural changes (reset, clear-all, delete, text commit) always
//!   trigger a full row rebuild; a completion toggle only patches its row.
//! - Every mutation persists before the view is updated.

use crate::clock::{format_full_date, Clock};
use crate::model::task::HourRange;
use crate::repo::slot_repo::SlotRepository;
use crate::service::task_store::{StoreError, StoreResult, TaskStore};
use crate::view::planner_view::{PlannerView, SlotRow};
use crate::view::slot::SlotEvent;
use log::info;

/// What the view did in response to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEffect {
    /// All rows were rebuilt from store state.
    Rebuilt,
    /// A single row changed in place.
    RowUpdated(u8),
    /// Temporal classes were re-derived; content untouched.
    Refreshed,
    /// Guarded no-op; nothing changed.
    NoChange,
}

/// Single-day planner composing store, view and an injected clock.
pub struct Planner<R: SlotRepository, C: Clock> {
    store: TaskStore<R>,
    view: PlannerView,
    clock: C,
}

impl<R: SlotRepository, C: Clock> Planner<R, C> {
    pub fn new(repo: R, clock: C, range: HourRange) -> Self {
        Self {
            store: TaskStore::new(repo),
            view: PlannerView::new(range),
            clock,
        }
    }

    /// Startup sequence: load persisted state, apply the daily reset rule,
    /// build all rows.
    pub fn init(&mut self) -> StoreResult<()> {
        self.store.load();
        let today = self.clock.day_marker();
        let reset = self.store.check_and_apply_daily_reset(&today)?;
        self.rebuild();
        info!(
            "event=planner_init module=planner status=ok marker={today} reset={reset} tasks={}",
            self.store.tasks().len()
        );
        Ok(())
    }

    /// Periodic refresh: re-check day rollover, then re-derive temporal
    /// classes. The front end owns the cadence; the core owns no timer.
    pub fn tick(&mut self) -> StoreResult<ViewEffect> {
        let today = self.clock.day_marker();
        if self.store.check_and_apply_daily_reset(&today)? {
            self.rebuild();
            return Ok(ViewEffect::Rebuilt);
        }

        self.view.refresh_temporal_class(self.clock.current_hour());
        Ok(ViewEffect::Refreshed)
    }

    /// Routes one slot gesture into the matching store mutation.
    pub fn handle(&mut self, hour: u8, event: SlotEvent) -> StoreResult<ViewEffect> {
        if !self.view.range().contains(hour) {
            return Err(StoreError::HourOutOfRange(hour));
        }

        match event {
            SlotEvent::AddEdit => Ok(if self.view.begin_edit(hour) {
                ViewEffect::RowUpdated(hour)
            } else {
                ViewEffect::NoChange
            }),
            SlotEvent::Save(text) => {
                self.store.set_task(hour, &text)?;
                self.rebuild();
                Ok(ViewEffect::Rebuilt)
            }
            SlotEvent::Delete => {
                if self.store.task(hour).is_none() {
                    return Ok(ViewEffect::NoChange);
                }
                self.store.delete_task(hour)?;
                self.rebuild();
                Ok(ViewEffect::Rebuilt)
            }
            SlotEvent::ToggleComplete => match self.store.toggle_complete(hour)? {
                Some(completed) => {
                    self.view.set_row_completed(hour, completed);
                    Ok(ViewEffect::RowUpdated(hour))
                }
                None => Ok(ViewEffect::NoChange),
            },
        }
    }

    /// Empties the store and rebuilds. Confirmation prompts belong to the
    /// front end, not the core.
    pub fn clear_all(&mut self) -> StoreResult<ViewEffect> {
        self.store.clear_all()?;
        self.rebuild();
        Ok(ViewEffect::Rebuilt)
    }

    /// Long-form header text for the current local date.
    pub fn today_header(&self) -> String {
        format_full_date(&self.clock.day_marker())
    }

    pub fn rows(&self) -> &[SlotRow] {
        self.view.rows()
    }

    pub fn row(&self, hour: u8) -> Option<&SlotRow> {
        self.view.row(hour)
    }

    pub fn range(&self) -> HourRange {
        self.view.range()
    }

    pub fn store(&self) -> &TaskStore<R> {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn rebuild(&mut self) {
        self.view
            .rebuild(self.store.tasks(), self.clock.current_hour());
    }
}
