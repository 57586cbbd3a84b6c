//! Task board domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by the store, the drag
//!   interpreter and the board views.
//! - Define the form-level draft and its validation rules.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod attachment;
pub mod draft;
pub mod task;
pub mod user;
