//! Slot storage contracts, SQLite and in-memory implementations.
//!
//! # Responsibility
//! - Provide stable get/set/delete APIs over string-keyed slots.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `set_slot` overwrites any prior value for the key.
//! - Reading an absent key yields `Ok(None)`, never an error.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key holding the serialized task map.
pub const TASKS_SLOT_KEY: &str = "dayPlannerTasks";
/// Slot key holding the last-seen day marker.
pub const DAY_MARKER_SLOT_KEY: &str = "dayPlannerLastDate";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for slot persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage interface for string-keyed slots.
///
/// The store depends only on this contract; any key-value backend with
/// string get/set semantics can stand in for SQLite.
pub trait SlotRepository {
    fn get_slot(&self, key: &str) -> RepoResult<Option<String>>;
    fn set_slot(&self, key: &str, value: &str) -> RepoResult<()>;
    fn delete_slot(&self, key: &str) -> RepoResult<()>;
}

impl<R: SlotRepository + ?Sized> SlotRepository for &R {
    fn get_slot(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get_slot(key)
    }

    fn set_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).set_slot(key, value)
    }

    fn delete_slot(&self, key: &str) -> RepoResult<()> {
        (**self).delete_slot(key)
    }
}

/// SQLite-backed slot repository over the `slots` table.
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SlotRepository for SqliteSlotRepository<'_> {
    fn get_slot(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete_slot(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM slots WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// In-memory slot repository for tests and database-free embedding.
#[derive(Debug, Default)]
pub struct MemorySlotRepository {
    slots: RefCell<HashMap<String, String>>,
}

impl MemorySlotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw slot value, bypassing store semantics.
    ///
    /// Test hook for simulating pre-existing or malformed persisted blobs.
    pub fn seed(&self, key: &str, value: &str) {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl SlotRepository for MemorySlotRepository {
    fn get_slot(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete_slot(&self, key: &str) -> RepoResult<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}
