//! Wall-clock abstraction and display formatting.
//!
//! # Responsibility
//! - Supply the current local date (day granularity) and hour to the core.
//! - Keep time injectable so store and view behavior is testable without
//!   touching the system clock.
//!
//! # Invariants
//! - Day markers are stable `%Y-%m-%d` strings, locale independent; display
//!   formatting never feeds back into comparisons.
//! - `current_hour()` is always in `[0, 23]`.

use chrono::{Local, NaiveDate, Timelike};
use std::cell::{Cell, RefCell};

/// Time source consumed by the store and view layers.
pub trait Clock {
    /// Current local date as a `%Y-%m-%d` day marker.
    fn day_marker(&self) -> String;

    /// Current local hour in 24-hour form.
    fn current_hour(&self) -> u8;
}

/// Production clock reading `chrono::Local`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn day_marker(&self) -> String {
        Local::now().format("%Y-%m-%d").to_string()
    }

    fn current_hour(&self) -> u8 {
        // Local hours are 0..=23, so the narrowing cast cannot truncate.
        Local::now().hour() as u8
    }
}

/// Deterministic clock for tests.
///
/// Interior mutability lets a test advance time through a shared reference
/// while a planner owns the clock.
#[derive(Debug)]
pub struct FixedClock {
    day: RefCell<String>,
    hour: Cell<u8>,
}

impl FixedClock {
    pub fn new(day: impl Into<String>, hour: u8) -> Self {
        Self {
            day: RefCell::new(day.into()),
            hour: Cell::new(hour),
        }
    }

    pub fn set_day(&self, day: impl Into<String>) {
        *self.day.borrow_mut() = day.into();
    }

    pub fn set_hour(&self, hour: u8) {
        self.hour.set(hour);
    }
}

impl Clock for FixedClock {
    fn day_marker(&self) -> String {
        self.day.borrow().clone()
    }

    fn current_hour(&self) -> u8 {
        self.hour.get()
    }
}

/// Formats a 24-hour hour as a 12-hour AM/PM slot label, e.g. `2 PM`.
pub fn format_hour_12h(hour: u8) -> String {
    let period = if hour >= 12 { "PM" } else { "AM" };
    let hour_12 = match hour % 12 {
        0 => 12,
        other => other,
    };
    format!("{hour_12} {period}")
}

/// Formats a `%Y-%m-%d` day marker as a long human-readable date,
/// e.g. `Friday, August 29, 2026`.
///
/// Falls back to the marker text itself when it does not parse; header
/// display must never fail on a foreign marker value.
pub fn format_full_date(marker: &str) -> String {
    match NaiveDate::parse_from_str(marker, "%Y-%m-%d") {
        Ok(date) => date.format("%A, %B %-d, %Y").to_string(),
        Err(_) => marker.to_string(),
    }
}
