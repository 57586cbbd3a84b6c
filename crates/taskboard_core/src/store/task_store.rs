//! Stateful task store: current collection plus persistence side effects.
//!
//! # Responsibility
//! - Rehydrate the collection once per session.
//! - Route every state change through [`reduce`] and persist the result.
//!
//! # Invariants
//! - State is replaced wholesale; no caller observes in-place mutation.
//! - No-op actions never write to storage.
//! - A failed write never rolls back the in-memory state.

use crate::model::task::TaskId;
use crate::repo::kv_repo::{KeyValueRepository, RepoError};
use crate::repo::snapshot::{load_snapshot, save_snapshot, TASKS_STORAGE_KEY};
use crate::store::action::Action;
use crate::store::reducer::{reduce, TaskList};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::time::Instant;

/// Result of one [`TaskStore::dispatch`] call.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The action was a no-op; nothing was written.
    Unchanged,
    /// State changed and the snapshot was written.
    Persisted,
    /// State changed in memory but the snapshot write failed.
    PersistFailed(RepoError),
}

impl DispatchOutcome {
    /// Whether the in-memory state changed.
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    pub fn persist_error(&self) -> Option<&RepoError> {
        match self {
            Self::PersistFailed(err) => Some(err),
            _ => None,
        }
    }
}

/// Owner of the session's task collection.
pub struct TaskStore<R: KeyValueRepository> {
    repo: R,
    key: String,
    state: TaskList,
}

impl<R: KeyValueRepository> TaskStore<R> {
    /// Rehydrates from the default storage key.
    pub fn open(repo: R) -> Self {
        Self::open_with_key(repo, TASKS_STORAGE_KEY)
    }

    /// Rehydrates from `key`.
    ///
    /// Absent, unreadable or malformed snapshots start an empty board.
    pub fn open_with_key(repo: R, key: impl Into<String>) -> Self {
        let key = key.into();
        let started_at = Instant::now();
        let state = match load_snapshot(&repo, &key) {
            Ok(Some(tasks)) => dedupe_ids(tasks),
            Ok(None) => TaskList::new(),
            Err(err) => {
                warn!(
                    "event=store_open module=store status=fallback key={} error={}",
                    key, err
                );
                TaskList::new()
            }
        };
        info!(
            "event=store_open module=store status=ok key={} tasks={} duration_ms={}",
            key,
            state.len(),
            started_at.elapsed().as_millis()
        );
        Self { repo, key, state }
    }

    /// Current collection.
    pub fn tasks(&self) -> &TaskList {
        &self.state
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Applies one action and persists the new state when it changed.
    pub fn dispatch(&mut self, action: Action) -> DispatchOutcome {
        let Some(next) = reduce(&self.state, &action) else {
            debug!(
                "event=store_dispatch module=store status=skip action={} task_id={}",
                action.name(),
                action.task_id()
            );
            return DispatchOutcome::Unchanged;
        };

        self.state = next;
        debug!(
            "event=store_dispatch module=store status=ok action={} task_id={} tasks={}",
            action.name(),
            action.task_id(),
            self.state.len()
        );

        match save_snapshot(&self.repo, &self.key, &self.state) {
            Ok(()) => DispatchOutcome::Persisted,
            Err(err) => {
                warn!(
                    "event=store_persist module=store status=error key={} action={} error={}",
                    self.key,
                    action.name(),
                    err
                );
                DispatchOutcome::PersistFailed(err)
            }
        }
    }
}

fn dedupe_ids(tasks: TaskList) -> TaskList {
    let total = tasks.len();
    let mut seen: HashSet<TaskId> = HashSet::with_capacity(total);
    let unique: TaskList = tasks
        .into_vec()
        .into_iter()
        .filter(|task| seen.insert(task.id))
        .collect();
    if unique.len() != total {
        warn!(
            "event=store_open module=store status=dedupe dropped={}",
            total - unique.len()
        );
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::{DispatchOutcome, TaskStore};
    use crate::model::task::{Status, Task};
    use crate::repo::kv_repo::{KeyValueRepository, MemoryKeyValueRepository};
    use crate::repo::snapshot::TASKS_STORAGE_KEY;
    use crate::store::action::Action;
    use uuid::Uuid;

    #[test]
    fn noop_dispatch_does_not_write() {
        let repo = MemoryKeyValueRepository::new();
        let mut store = TaskStore::open(&repo);

        let outcome = store.dispatch(Action::Delete { id: Uuid::new_v4() });
        assert!(matches!(outcome, DispatchOutcome::Unchanged));
        assert!(repo.is_empty());
    }

    #[test]
    fn successful_dispatch_writes_full_snapshot() {
        let repo = MemoryKeyValueRepository::new();
        let mut store = TaskStore::open(&repo);
        let task = Task::new("write tests");

        assert!(matches!(
            store.dispatch(Action::Add(task.clone())),
            DispatchOutcome::Persisted
        ));
        let raw = repo.get(TASKS_STORAGE_KEY).unwrap().unwrap();
        assert!(raw.contains(&task.id.to_string()));
    }

    #[test]
    fn duplicate_ids_in_snapshot_keep_first() {
        let repo = MemoryKeyValueRepository::new();
        let id = Uuid::new_v4();
        let first = Task::with_id(id, "first", 1);
        let second = Task::with_id(id, "second", 2).with_status(Status::Done);
        let raw = serde_json::to_string(&vec![first.clone(), second]).unwrap();
        repo.set(TASKS_STORAGE_KEY, &raw).unwrap();

        let store = TaskStore::open(&repo);
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks().get(id), Some(&first));
    }
}
