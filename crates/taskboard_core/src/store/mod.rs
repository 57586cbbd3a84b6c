//! Task store: actions, pure reducer and the persisting session store.
//!
//! # Responsibility
//! - Keep one flat task collection as the single source of truth.
//! - Accept state changes only through [`Action`] dispatch.
//!
//! # Invariants
//! - Unknown ids, stale reorders and same-position reorders are no-ops.
//! - Reorder never changes a status; move never reorders other tasks.

pub mod action;
pub mod reducer;
pub mod task_store;

pub use action::Action;
pub use reducer::{reduce, TaskList};
pub use task_store::{DispatchOutcome, TaskStore};
