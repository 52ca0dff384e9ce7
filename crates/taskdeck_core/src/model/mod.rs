//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical `Task` record persisted in the task slot.
//! - Own the fixed category enumeration and its style lookup table.
//! - Validate creation input before it reaches the store.
//!
//! # Invariants
//! - `Task::id` and `Task::created_at` never change after creation.
//! - The wire shape (camelCase keys, RFC 3339 timestamps) is stable.

pub mod category;
pub mod id;
pub mod task;
