//! Board use-case service.
//!
//! # Responsibility
//! - Own one session's task store and drag interpreter.
//! - Provide use-case entry points for form, picker, attachment and
//!   gesture collaborators.
//!
//! # Invariants
//! - Every state change goes through `TaskStore::dispatch`.
//! - Service-level lookups may report `TaskNotFound`, but store actions for
//!   unknown ids stay no-ops.
//! - Persistence failures are reported, never rolled back.

use crate::board::{column_for, derive_columns, ColumnView};
use crate::drag::{resolve_drop, DragInterpreter, DragResolution, DropTarget, PointerPosition};
use crate::model::attachment::TaskFile;
use crate::model::draft::{TaskDraft, TaskDraftError};
use crate::model::task::{now_epoch_ms, Status, Task, TaskId};
use crate::model::user::User;
use crate::repo::kv_repo::{KeyValueRepository, RepoError};
use crate::service::user_directory::UserDirectory;
use crate::store::{Action, DispatchOutcome, TaskList, TaskStore};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ServiceResult<T> = Result<T, BoardServiceError>;

/// Errors from board use-case operations.
#[derive(Debug)]
pub enum BoardServiceError {
    /// Form input failed validation; nothing was dispatched.
    InvalidDraft(TaskDraftError),
    /// Target task does not exist.
    TaskNotFound(TaskId),
    /// Assignee id is not in the user directory.
    UserNotFound(String),
    /// State changed in memory but could not be written.
    Persist(RepoError),
}

impl Display for BoardServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDraft(err) => write!(f, "invalid task: {err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::Persist(err) => write!(f, "change kept but not saved: {err}"),
        }
    }
}

impl Error for BoardServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDraft(err) => Some(err),
            Self::TaskNotFound(_) => None,
            Self::UserNotFound(_) => None,
            Self::Persist(err) => Some(err),
        }
    }
}

impl From<TaskDraftError> for BoardServiceError {
    fn from(value: TaskDraftError) -> Self {
        Self::InvalidDraft(value)
    }
}

/// Application state for one running board session.
pub struct BoardService<R: KeyValueRepository> {
    store: TaskStore<R>,
    drag: DragInterpreter,
    users: UserDirectory,
}

impl<R: KeyValueRepository> BoardService<R> {
    /// Rehydrates the board from `repo` with default directory and drag settings.
    pub fn open(repo: R) -> Self {
        Self::from_parts(
            TaskStore::open(repo),
            DragInterpreter::new(),
            UserDirectory::default(),
        )
    }

    pub fn from_parts(store: TaskStore<R>, drag: DragInterpreter, users: UserDirectory) -> Self {
        Self { store, drag, users }
    }

    pub fn tasks(&self) -> &TaskList {
        self.store.tasks()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.store.tasks().get(id)
    }

    pub fn columns(&self) -> [ColumnView<'_>; 3] {
        derive_columns(self.store.tasks())
    }

    pub fn column(&self, status: Status) -> ColumnView<'_> {
        column_for(self.store.tasks(), status)
    }

    pub fn users(&self) -> &[User] {
        self.users.users()
    }

    pub fn drag(&self) -> &DragInterpreter {
        &self.drag
    }

    /// Raw dispatch for collaborators that build actions themselves.
    pub fn dispatch(&mut self, action: Action) -> DispatchOutcome {
        self.store.dispatch(action)
    }

    /// Creates a `todo` task from a validated draft; returns its id.
    pub fn create_task(&mut self, draft: TaskDraft) -> ServiceResult<TaskId> {
        let task = draft.into_task(Uuid::new_v4(), now_epoch_ms())?;
        let id = task.id;
        self.commit(Action::Add(task))?;
        Ok(id)
    }

    /// Applies an edit form to an existing task.
    pub fn edit_task(&mut self, id: TaskId, draft: TaskDraft) -> ServiceResult<()> {
        let original = self.require(id)?;
        let edited = draft.apply_to(original, now_epoch_ms())?;
        self.commit(Action::Update(edited))
    }

    pub fn delete_task(&mut self, id: TaskId) -> ServiceResult<()> {
        self.commit(Action::Delete { id })
    }

    pub fn move_task(&mut self, id: TaskId, status: Status) -> ServiceResult<()> {
        self.commit(Action::Move { id, status })
    }

    pub fn reorder_task(&mut self, status: Status, id: TaskId, to_index: i64) -> ServiceResult<()> {
        self.commit(Action::Reorder {
            status,
            id,
            to_index,
        })
    }

    /// Snapshot of a directory user for a draft or assignment.
    ///
    /// `None` means unassigned. Nothing is dispatched.
    pub fn resolve_assignee(&self, user_id: Option<&str>) -> ServiceResult<Option<User>> {
        user_id
            .map(|user_id| {
                self.users
                    .find(user_id)
                    .cloned()
                    .ok_or_else(|| BoardServiceError::UserNotFound(user_id.to_string()))
            })
            .transpose()
    }

    /// Stores a snapshot of the directory user, or clears the assignee.
    pub fn assign_task(&mut self, id: TaskId, user_id: Option<&str>) -> ServiceResult<()> {
        let assignee = self.resolve_assignee(user_id)?;
        self.modify(id, |task| task.assignee = assignee)
    }

    /// Encodes and attaches a file, replacing any previous attachment.
    pub fn attach_file(
        &mut self,
        id: TaskId,
        name: &str,
        mime_type: &str,
        bytes: &[u8],
    ) -> ServiceResult<()> {
        let file = TaskFile::from_bytes(name, mime_type, bytes);
        self.modify(id, |task| task.file = Some(file))
    }

    pub fn detach_file(&mut self, id: TaskId) -> ServiceResult<()> {
        self.modify(id, |task| task.file = None)
    }

    pub fn pointer_down(&mut self, id: TaskId, at: PointerPosition) {
        self.drag.pointer_down(id, at);
    }

    /// Returns `true` on the move that activates the drag.
    pub fn pointer_move(&mut self, at: PointerPosition) -> bool {
        self.drag.pointer_move(at)
    }

    /// Finishes the gesture and dispatches the resolved action, if any.
    pub fn pointer_up(&mut self, over: Option<DropTarget>) -> ServiceResult<DragResolution> {
        let resolution = self.drag.pointer_up(over, self.store.tasks());
        if let Some(action) = resolution.action().cloned() {
            self.commit(action)?;
        }
        Ok(resolution)
    }

    pub fn cancel_drag(&mut self) -> DragResolution {
        self.drag.cancel()
    }

    /// One-shot drag end for hosts that detect gestures themselves.
    ///
    /// `over_id` is a droppable id; `None` or an unknown id is a cancel.
    /// Returns the dispatched action.
    pub fn drop_task(
        &mut self,
        active_id: TaskId,
        over_id: Option<&str>,
    ) -> ServiceResult<Option<Action>> {
        let Some(target) = over_id.and_then(DropTarget::parse) else {
            return Ok(None);
        };
        let Some(action) = resolve_drop(self.store.tasks(), active_id, target) else {
            return Ok(None);
        };
        self.commit(action.clone())?;
        Ok(Some(action))
    }

    fn require(&self, id: TaskId) -> ServiceResult<&Task> {
        self.store
            .tasks()
            .get(id)
            .ok_or(BoardServiceError::TaskNotFound(id))
    }

    fn modify(&mut self, id: TaskId, change: impl FnOnce(&mut Task)) -> ServiceResult<()> {
        let mut task = self.require(id)?.clone();
        change(&mut task);
        task.touch(now_epoch_ms());
        self.commit(Action::Update(task))
    }

    fn commit(&mut self, action: Action) -> ServiceResult<()> {
        match self.store.dispatch(action) {
            DispatchOutcome::Unchanged | DispatchOutcome::Persisted => Ok(()),
            DispatchOutcome::PersistFailed(err) => Err(BoardServiceError::Persist(err)),
        }
    }
}
