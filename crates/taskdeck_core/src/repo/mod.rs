//! Repository layer over the task slot.
//!
//! # Responsibility
//! - Define the task CRUD contract used by services and hosts.
//! - Keep JSON encoding and slot access inside the persistence boundary.
//!
//! # Invariants
//! - Reads never fail: a missing or unreadable slot is an empty collection.
//! - Mutations never overwrite a slot they could not load.
//! - Lookup misses on update/delete/toggle are silent no-ops.
//! - Every mutation is one whole-collection write.

pub mod task_repo;
