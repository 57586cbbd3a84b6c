//! FFI use-case API for UI-host calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level board functions to the UI host via FRB.
//! - Map core types to flat, string-keyed envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Each call runs one load → dispatch → save cycle under a process-wide lock.
//! - Ids, statuses and priorities cross the boundary as their string keys.

use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use taskboard_core::db::open_db;
use taskboard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Action, BoardService, BoardServiceError, CardView, ColumnView, Priority, ServiceResult,
    SqliteKeyValueRepository, Status, TaskDraft, TaskId,
};
use uuid::Uuid;

const BOARD_DB_FILE_NAME: &str = "taskboard.sqlite3";
const BOARD_DB_PATH_ENV: &str = "TASKBOARD_DB_PATH";
static BOARD_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static BOARD_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One task card as rendered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCardItem {
    pub task_id: String,
    pub title: String,
    /// `low|medium|high`.
    pub priority: String,
    pub assignee_name: Option<String>,
    pub due_date: Option<String>,
    pub file_name: Option<String>,
}

/// One board column in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumnItem {
    /// Status key; also the droppable id of the column.
    pub status: String,
    pub title: String,
    /// Empty-state text; `None` when the column has cards.
    pub placeholder: Option<String>,
    pub cards: Vec<BoardCardItem>,
}

/// Whole-board view envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardViewResponse {
    /// Always three columns on success, empty on failure.
    pub columns: Vec<BoardColumnItem>,
    pub message: String,
}

/// Assignable user for the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardUserItem {
    pub user_id: String,
    pub name: String,
    pub email: Option<String>,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected task id, when there is one.
    pub task_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl BoardActionResponse {
    fn success(message: impl Into<String>, task_id: Option<TaskId>) -> Self {
        Self {
            ok: true,
            task_id: task_id.map(|id| id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Form values shared by create and update calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardTaskInput {
    pub title: String,
    pub description: String,
    /// `low|medium|high`; blank means `medium`.
    pub priority: String,
    pub due_date: String,
    /// Directory user id; `None` leaves the task unassigned.
    pub assignee_id: Option<String>,
}

/// Returns the current board split into columns.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn board_view() -> BoardViewResponse {
    match with_board_service(|service| Ok(service.columns().iter().map(to_column_item).collect())) {
        Ok(columns) => BoardViewResponse {
            columns,
            message: String::new(),
        },
        Err(err) => BoardViewResponse {
            columns: Vec::new(),
            message: format!("board_view failed: {err}"),
        },
    }
}

/// Lists users that can be assigned to tasks.
#[flutter_rust_bridge::frb(sync)]
pub fn board_list_users() -> Vec<BoardUserItem> {
    taskboard_core::UserDirectory::default()
        .users()
        .iter()
        .map(|user| BoardUserItem {
            user_id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        })
        .collect()
}

/// Creates a task in the `todo` column.
///
/// # FFI contract
/// - Validates title/description bounds and the assignee before any write;
///   failures return `ok=false` and leave the board unchanged.
/// - Returns created task id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn board_create_task(input: BoardTaskInput) -> BoardActionResponse {
    let result = to_draft(&input).and_then(|mut draft| {
        with_board_service(|service| {
            draft.assignee = service.resolve_assignee(input.assignee_id.as_deref())?;
            service.create_task(draft)
        })
    });
    match result {
        Ok(id) => BoardActionResponse::success("Task created.", Some(id)),
        Err(err) => BoardActionResponse::failure(format!("board_create_task failed: {err}")),
    }
}

/// Replaces the editable fields of an existing task.
///
/// # FFI contract
/// - The attachment is kept; the assignee is replaced by `input.assignee_id`.
/// - Unknown task or assignee returns `ok=false` and writes nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn board_update_task(task_id: String, input: BoardTaskInput) -> BoardActionResponse {
    let result = parse_task_id(&task_id).and_then(|id| {
        let mut draft = to_draft(&input)?;
        with_board_service(|service| {
            let existing = service
                .task(id)
                .ok_or(BoardServiceError::TaskNotFound(id))?;
            draft.file = existing.file.clone();
            draft.assignee = service.resolve_assignee(input.assignee_id.as_deref())?;
            service.edit_task(id, draft)?;
            Ok(id)
        })
    });
    match result {
        Ok(id) => BoardActionResponse::success("Task updated.", Some(id)),
        Err(err) => BoardActionResponse::failure(format!("board_update_task failed: {err}")),
    }
}

/// Deletes a task. Unknown ids succeed without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn board_delete_task(task_id: String) -> BoardActionResponse {
    run_action("board_delete_task", &task_id, "Task deleted.", |service, id| {
        service.delete_task(id)
    })
}

/// Moves a task to another column (appended at the end).
#[flutter_rust_bridge::frb(sync)]
pub fn board_move_task(task_id: String, status: String) -> BoardActionResponse {
    let status = match parse_status(&status) {
        Ok(status) => status,
        Err(err) => return BoardActionResponse::failure(format!("board_move_task failed: {err}")),
    };
    run_action("board_move_task", &task_id, "Task moved.", |service, id| {
        service.move_task(id, status)
    })
}

/// Moves a task within its column. `to_index` is clamped.
#[flutter_rust_bridge::frb(sync)]
pub fn board_reorder_task(status: String, task_id: String, to_index: i64) -> BoardActionResponse {
    let status = match parse_status(&status) {
        Ok(status) => status,
        Err(err) => {
            return BoardActionResponse::failure(format!("board_reorder_task failed: {err}"))
        }
    };
    run_action("board_reorder_task", &task_id, "Task reordered.", |service, id| {
        service.reorder_task(status, id, to_index)
    })
}

/// Resolves a finished drag gesture.
///
/// `over_id` is the droppable id under the pointer: a status key for a
/// column, a task id for a card, or `None` when released over nothing.
///
/// # FFI contract
/// - Returns `ok=true` for no-op drops; `message` names the dispatched action.
#[flutter_rust_bridge::frb(sync)]
pub fn board_drop_task(active_id: String, over_id: Option<String>) -> BoardActionResponse {
    let result = parse_task_id(&active_id).and_then(|id| {
        with_board_service(|service| service.drop_task(id, over_id.as_deref()))
            .map(|action| (id, action))
    });
    match result {
        Ok((id, Some(action))) => BoardActionResponse::success(drop_message(&action), Some(id)),
        Ok((id, None)) => BoardActionResponse::success("No change.", Some(id)),
        Err(err) => BoardActionResponse::failure(format!("board_drop_task failed: {err}")),
    }
}

/// Attaches a file to a task, replacing any previous one.
#[flutter_rust_bridge::frb(sync)]
pub fn board_attach_file(
    task_id: String,
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
) -> BoardActionResponse {
    run_action("board_attach_file", &task_id, "File attached.", |service, id| {
        service.attach_file(id, name.trim(), mime_type.trim(), &bytes)
    })
}

type SqliteBoard<'conn> = BoardService<SqliteKeyValueRepository<'conn>>;

fn run_action(
    name: &str,
    task_id: &str,
    message: &str,
    f: impl FnOnce(&mut SqliteBoard<'_>, TaskId) -> ServiceResult<()>,
) -> BoardActionResponse {
    let result = parse_task_id(task_id)
        .and_then(|id| with_board_service(|service| f(service, id)).map(|()| id));
    match result {
        Ok(id) => BoardActionResponse::success(message, Some(id)),
        Err(err) => BoardActionResponse::failure(format!("{name} failed: {err}")),
    }
}

fn with_board_service<T>(
    f: impl FnOnce(&mut SqliteBoard<'_>) -> ServiceResult<T>,
) -> Result<T, String> {
    let _guard = BOARD_LOCK.lock().unwrap_or_else(|poisoned| {
        warn!("event=ffi_lock module=ffi status=recovered reason=poisoned");
        poisoned.into_inner()
    });
    let db_path = resolve_board_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("board DB open failed: {err}"))?;
    let repo = SqliteKeyValueRepository::try_new(&conn)
        .map_err(|err| format!("board repo init failed: {err}"))?;
    let mut service = BoardService::open(repo);
    f(&mut service).map_err(|err| err.to_string())
}

fn resolve_board_db_path() -> PathBuf {
    BOARD_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(BOARD_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(BOARD_DB_FILE_NAME)
        })
        .clone()
}

fn to_draft(input: &BoardTaskInput) -> Result<TaskDraft, String> {
    let priority = if input.priority.trim().is_empty() {
        Priority::default()
    } else {
        Priority::from_key(&input.priority)
            .ok_or_else(|| format!("unknown priority `{}`", input.priority.trim()))?
    };
    let mut draft = TaskDraft::new(input.title.as_str());
    draft.description = input.description.clone();
    draft.priority = priority;
    draft.due_date = input.due_date.trim().to_string();
    draft.validate().map_err(|err| err.to_string())?;
    Ok(draft)
}

fn parse_task_id(value: &str) -> Result<TaskId, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid task id `{}`", value.trim()))
}

fn parse_status(value: &str) -> Result<Status, String> {
    Status::from_key(value.trim()).ok_or_else(|| format!("unknown status `{}`", value.trim()))
}

fn drop_message(action: &Action) -> String {
    match action {
        Action::Move { status, .. } => format!("Moved to {}.", status.title()),
        Action::Reorder { to_index, .. } => format!("Reordered to position {to_index}."),
        other => format!("Applied {}.", other.name()),
    }
}

fn to_column_item(column: &ColumnView<'_>) -> BoardColumnItem {
    BoardColumnItem {
        status: column.status.key().to_string(),
        title: column.title.to_string(),
        placeholder: column.placeholder().map(str::to_string),
        cards: column.cards().into_iter().map(to_card_item).collect(),
    }
}

fn to_card_item(card: CardView) -> BoardCardItem {
    BoardCardItem {
        task_id: card.id.to_string(),
        title: card.title,
        priority: card.priority.key().to_string(),
        assignee_name: card.assignee_name,
        due_date: card.due_date,
        file_name: card.file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        board_attach_file, board_create_task, board_delete_task, board_drop_task,
        board_list_users, board_move_task, board_reorder_task, board_update_task, board_view,
        core_version, init_logging, ping, BoardTaskInput,
    };
    use rusqlite::params;
    use std::time::{SystemTime, UNIX_EPOCH};
    use taskboard_core::db::open_db;
    use taskboard_core::TASKS_STORAGE_KEY;

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn create_task_lands_in_todo_column() {
        let title = unique_token("create");
        let created = board_create_task(input(&title));
        assert!(created.ok, "{}", created.message);
        let task_id = created.task_id.expect("create should return task_id");

        let view = board_view();
        assert_eq!(view.columns.len(), 3, "{}", view.message);
        let todo = &view.columns[0];
        assert_eq!(todo.status, "todo");
        assert_eq!(todo.title, "Todo");
        let card = todo
            .cards
            .iter()
            .find(|card| card.task_id == task_id)
            .expect("created card should be in todo");
        assert_eq!(card.title, title);
        assert_eq!(card.priority, "medium");
    }

    #[test]
    fn create_task_rejects_short_title_and_bad_priority() {
        let response = board_create_task(input("x"));
        assert!(!response.ok);
        assert!(response.message.contains("title"));

        let mut bad_priority = input("valid title");
        bad_priority.priority = "urgent".to_string();
        let response = board_create_task(bad_priority);
        assert!(!response.ok);
        assert!(response.message.contains("priority"));
    }

    #[test]
    fn update_task_keeps_attachment_and_sets_assignee() {
        let created = board_create_task(input(&unique_token("update")));
        let task_id = created.task_id.expect("create should return task_id");
        let attached =
            board_attach_file(task_id.clone(), "a.txt".into(), "text/plain".into(), b"a".to_vec());
        assert!(attached.ok, "{}", attached.message);

        let mut edit = input("renamed task");
        edit.priority = "high".to_string();
        edit.assignee_id = Some("u1".to_string());
        let updated = board_update_task(task_id.clone(), edit);
        assert!(updated.ok, "{}", updated.message);

        let card = find_card(&task_id).expect("updated card should be on the board");
        assert_eq!(card.title, "renamed task");
        assert_eq!(card.priority, "high");
        assert_eq!(card.assignee_name.as_deref(), Some("Alice Johnson"));
        assert_eq!(card.file_name.as_deref(), Some("a.txt"));
    }

    #[test]
    fn create_with_unknown_assignee_writes_nothing() {
        let title = unique_token("ghost-assignee");
        let mut request = input(&title);
        request.assignee_id = Some("u9".to_string());

        let response = board_create_task(request);
        assert!(!response.ok);
        assert!(response.message.contains("user not found"));
        assert!(response.task_id.is_none());
        assert!(board_view()
            .columns
            .iter()
            .flat_map(|column| column.cards.iter())
            .all(|card| card.title != title));
    }

    #[test]
    fn update_with_unknown_assignee_keeps_previous_task() {
        let title = unique_token("keep");
        let mut request = input(&title);
        request.assignee_id = Some("u1".to_string());
        let task_id = board_create_task(request)
            .task_id
            .expect("create should return task_id");

        let mut edit = input("renamed task");
        edit.assignee_id = Some("u9".to_string());
        let response = board_update_task(task_id.clone(), edit);
        assert!(!response.ok);

        let card = find_card(&task_id).expect("card should still be on the board");
        assert_eq!(card.title, title);
        assert_eq!(card.assignee_name.as_deref(), Some("Alice Johnson"));
    }

    #[test]
    fn update_unknown_task_fails() {
        let response = board_update_task(uuid::Uuid::new_v4().to_string(), input("nobody home"));
        assert!(!response.ok);
        assert!(response.message.contains("task not found"));
    }

    #[test]
    fn drop_on_column_moves_and_drop_on_foreign_card_does_nothing() {
        let first = board_create_task(input(&unique_token("drop-a")))
            .task_id
            .expect("task a");
        let second = board_create_task(input(&unique_token("drop-b")))
            .task_id
            .expect("task b");

        let moved = board_drop_task(first.clone(), Some("done".to_string()));
        assert!(moved.ok, "{}", moved.message);
        assert!(moved.message.contains("Done"));
        assert_eq!(column_of(&first).as_deref(), Some("done"));

        let ignored = board_drop_task(second.clone(), Some(first.clone()));
        assert!(ignored.ok);
        assert_eq!(ignored.message, "No change.");
        assert_eq!(column_of(&second).as_deref(), Some("todo"));

        let cancelled = board_drop_task(second.clone(), None);
        assert_eq!(cancelled.message, "No change.");
    }

    #[test]
    fn move_reorder_and_delete_roundtrip() {
        let a = board_create_task(input(&unique_token("col-a")))
            .task_id
            .expect("task a");
        let b = board_create_task(input(&unique_token("col-b")))
            .task_id
            .expect("task b");
        assert!(board_move_task(a.clone(), "inprogress".into()).ok);
        assert!(board_move_task(b.clone(), "inprogress".into()).ok);

        let reordered = board_reorder_task("inprogress".into(), b.clone(), -10);
        assert!(reordered.ok, "{}", reordered.message);
        let view = board_view();
        let in_progress = &view.columns[1].cards;
        assert_eq!(card_position(in_progress, &b), Some(0));
        assert!(card_position(in_progress, &a) > card_position(in_progress, &b));

        assert!(board_delete_task(a.clone()).ok);
        assert!(find_card(&a).is_none());
    }

    #[test]
    fn invalid_ids_and_statuses_fail_without_panicking() {
        assert!(!board_delete_task("not-a-uuid".into()).ok);
        assert!(!board_move_task(uuid::Uuid::new_v4().to_string(), "archived".into()).ok);
        assert!(!board_reorder_task("todo".into(), "nope".into(), 0).ok);
    }

    #[test]
    fn create_task_is_persisted_under_storage_key() {
        let title = unique_token("persist");
        let created = board_create_task(input(&title));
        assert!(created.ok, "{}", created.message);

        let conn = open_db(super::resolve_board_db_path()).expect("open db");
        let raw: String = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                params![TASKS_STORAGE_KEY],
                |row| row.get(0),
            )
            .expect("snapshot row");
        assert!(raw.contains(&title));
    }

    #[test]
    fn list_users_returns_directory() {
        let users = board_list_users();
        assert_eq!(users.len(), 4);
        assert_eq!(users[0].user_id, "u1");
    }

    fn input(title: &str) -> BoardTaskInput {
        BoardTaskInput {
            title: title.to_string(),
            ..BoardTaskInput::default()
        }
    }

    fn find_card(task_id: &str) -> Option<super::BoardCardItem> {
        board_view()
            .columns
            .into_iter()
            .flat_map(|column| column.cards)
            .find(|card| card.task_id == task_id)
    }

    fn column_of(task_id: &str) -> Option<String> {
        board_view()
            .columns
            .into_iter()
            .find(|column| column.cards.iter().any(|card| card.task_id == task_id))
            .map(|column| column.status)
    }

    fn card_position(cards: &[super::BoardCardItem], task_id: &str) -> Option<usize> {
        cards.iter().position(|card| card.task_id == task_id)
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
