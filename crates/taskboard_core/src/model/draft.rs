//! Create/edit form payload and its validation rules.
//!
//! # Responsibility
//! - Validate user input before it reaches the task store.
//! - Turn a validated draft into a new task or an edit of an existing one.
//!
//! # Invariants
//! - The task store never re-validates; only drafts that pass
//!   [`TaskDraft::validate`] are turned into tasks.
//! - Editing keeps `id`, `status` and `created_at` of the original task.

use crate::model::attachment::TaskFile;
use crate::model::task::{Priority, Status, Task, TaskId};
use crate::model::user::User;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum title length in characters, after trimming.
pub const TITLE_MIN_CHARS: usize = 2;
/// Maximum description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

/// Validation failures for [`TaskDraft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskDraftError {
    TitleTooShort { min: usize, actual: usize },
    DescriptionTooLong { max: usize, actual: usize },
}

impl Display for TaskDraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleTooShort { min, actual } => write!(
                f,
                "title must be at least {min} characters, got {actual}"
            ),
            Self::DescriptionTooLong { max, actual } => write!(
                f,
                "description must be at most {max} characters, got {actual}"
            ),
        }
    }
}

impl Error for TaskDraftError {}

/// Form values for creating or editing a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: String,
    pub assignee: Option<User>,
    pub file: Option<TaskFile>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Prefills a draft from an existing task for the edit form.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority,
            due_date: task.due_date.clone().unwrap_or_default(),
            assignee: task.assignee.clone(),
            file: task.file.clone(),
        }
    }

    /// Checks title and description bounds.
    pub fn validate(&self) -> Result<(), TaskDraftError> {
        let title_chars = self.title.trim().chars().count();
        if title_chars < TITLE_MIN_CHARS {
            return Err(TaskDraftError::TitleTooShort {
                min: TITLE_MIN_CHARS,
                actual: title_chars,
            });
        }

        let description_chars = self.description.chars().count();
        if description_chars > DESCRIPTION_MAX_CHARS {
            return Err(TaskDraftError::DescriptionTooLong {
                max: DESCRIPTION_MAX_CHARS,
                actual: description_chars,
            });
        }

        Ok(())
    }

    /// Builds a new `todo` task with the given identity and timestamp.
    pub fn into_task(self, id: TaskId, now_ms: i64) -> Result<Task, TaskDraftError> {
        self.validate()?;
        let mut task = Task::with_id(id, self.title.trim(), now_ms);
        task.status = Status::Todo;
        self.fill(&mut task);
        Ok(task)
    }

    /// Produces an edited copy of `original`.
    pub fn apply_to(self, original: &Task, now_ms: i64) -> Result<Task, TaskDraftError> {
        self.validate()?;
        let mut task = original.clone();
        task.title = self.title.trim().to_string();
        self.fill(&mut task);
        task.touch(now_ms);
        Ok(task)
    }

    fn fill(self, task: &mut Task) {
        task.description = non_blank(self.description);
        task.priority = self.priority;
        task.due_date = non_blank(self.due_date);
        task.assignee = self.assignee;
        task.file = self.file;
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
