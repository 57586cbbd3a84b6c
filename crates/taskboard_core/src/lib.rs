//! Core domain logic for the task board.
//! This crate is the single source of truth for board ordering invariants.

pub mod board;
pub mod db;
pub mod drag;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use board::{derive_columns, CardView, ColumnView, EMPTY_COLUMN_PLACEHOLDER};
pub use drag::{
    resolve_drop, DragInterpreter, DragPhase, DragResolution, DropTarget, PointerPosition,
    DEFAULT_ACTIVATION_DISTANCE_PX,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::attachment::TaskFile;
pub use model::draft::{TaskDraft, TaskDraftError, DESCRIPTION_MAX_CHARS, TITLE_MIN_CHARS};
pub use model::task::{now_epoch_ms, Priority, Status, Task, TaskId};
pub use model::user::User;
pub use repo::kv_repo::{
    KeyValueRepository, MemoryKeyValueRepository, RepoError, RepoResult, SqliteKeyValueRepository,
};
pub use repo::snapshot::{load_snapshot, save_snapshot, TASKS_STORAGE_KEY};
pub use service::board_service::{BoardService, BoardServiceError, ServiceResult};
pub use service::user_directory::UserDirectory;
pub use store::{reduce, Action, DispatchOutcome, TaskList, TaskStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
