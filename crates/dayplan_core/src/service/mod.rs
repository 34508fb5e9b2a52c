//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate slot persistence into the task-store contract.
//! - Glue store, view and clock into the planner control flow.
//! - Keep front ends decoupled from storage details.

pub mod planner;
pub mod task_store;
