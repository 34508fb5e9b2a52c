//! Persistence layer abstractions and implementations.
//!
//! # Responsibility
//! - Define the string-keyed slot storage contract the store depends on.
//! - Isolate SQLite query details from store/view orchestration.
//!
//! # Invariants
//! - The store only ever sees get/set/delete-by-key semantics over strings;
//!   blob formats are opaque at this layer.

pub mod slot_repo;
