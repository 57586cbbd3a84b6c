//! Store actions.

use crate::model::task::{Status, Task, TaskId};
use std::fmt::{Display, Formatter};

/// The five state transitions accepted by the task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Inserts a fully-formed task at the front of the collection.
    Add(Task),
    /// Replaces the task with the same id, keeping its position.
    Update(Task),
    /// Changes the status of one task.
    Move { id: TaskId, status: Status },
    /// Removes one task.
    Delete { id: TaskId },
    /// Moves one task within its status partition. `to_index` is clamped.
    Reorder {
        status: Status,
        id: TaskId,
        to_index: i64,
    },
}

impl Action {
    /// Short action name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Update(_) => "update",
            Self::Move { .. } => "move",
            Self::Delete { .. } => "delete",
            Self::Reorder { .. } => "reorder",
        }
    }

    /// Id of the task this action targets.
    pub fn task_id(&self) -> TaskId {
        match self {
            Self::Add(task) | Self::Update(task) => task.id,
            Self::Move { id, .. } | Self::Delete { id } | Self::Reorder { id, .. } => *id,
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name(), self.task_id())
    }
}
