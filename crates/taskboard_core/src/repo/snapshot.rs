//! Task snapshot codec over a key-value repository.
//!
//! # Responsibility
//! - Encode the whole task collection as one JSON array value.
//! - Decode it back, reporting malformed data instead of masking it.
//!
//! # Invariants
//! - Saves are full overwrites; there is no incremental format.
//! - Fallback policy for malformed data belongs to the caller.

use crate::repo::kv_repo::{KeyValueRepository, RepoError, RepoResult};
use crate::store::reducer::TaskList;

/// Fixed namespace key the task collection is stored under.
pub const TASKS_STORAGE_KEY: &str = "tm_tasks";

/// Loads the snapshot stored under `key`.
///
/// Returns `Ok(None)` when nothing has been stored yet.
pub fn load_snapshot<R: KeyValueRepository + ?Sized>(
    repo: &R,
    key: &str,
) -> RepoResult<Option<TaskList>> {
    let Some(raw) = repo.get(key)? else {
        return Ok(None);
    };
    let tasks = serde_json::from_str::<TaskList>(&raw).map_err(|source| RepoError::Decode {
        key: key.to_string(),
        source,
    })?;
    Ok(Some(tasks))
}

/// Overwrites the snapshot stored under `key`.
pub fn save_snapshot<R: KeyValueRepository + ?Sized>(
    repo: &R,
    key: &str,
    tasks: &TaskList,
) -> RepoResult<()> {
    let raw = serde_json::to_string(tasks).map_err(RepoError::Encode)?;
    repo.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::{load_snapshot, save_snapshot, TASKS_STORAGE_KEY};
    use crate::model::task::{Status, Task};
    use crate::repo::kv_repo::{KeyValueRepository, MemoryKeyValueRepository, RepoError};
    use crate::store::reducer::TaskList;
    use uuid::Uuid;

    #[test]
    fn missing_key_loads_as_none() {
        let repo = MemoryKeyValueRepository::new();
        assert!(load_snapshot(&repo, TASKS_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn snapshot_is_a_plain_json_array() {
        let repo = MemoryKeyValueRepository::new();
        let tasks = TaskList::from(vec![
            Task::with_id(Uuid::new_v4(), "a", 1).with_status(Status::InProgress)
        ]);
        save_snapshot(&repo, TASKS_STORAGE_KEY, &tasks).unwrap();

        let raw = repo.get(TASKS_STORAGE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["status"], "inprogress");
        assert_eq!(json[0]["createdAt"], "1970-01-01T00:00:00.001Z");

        assert_eq!(load_snapshot(&repo, TASKS_STORAGE_KEY).unwrap(), Some(tasks));
    }

    #[test]
    fn malformed_value_is_reported() {
        let repo = MemoryKeyValueRepository::new();
        repo.set(TASKS_STORAGE_KEY, "{not json").unwrap();
        let err = load_snapshot(&repo, TASKS_STORAGE_KEY).unwrap_err();
        assert!(matches!(err, RepoError::Decode { .. }));
    }
}
