//! Drop target parsing and drop-to-action resolution.

use crate::model::task::{Status, TaskId};
use crate::store::action::Action;
use crate::store::reducer::TaskList;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Something a dragged card can be released over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// A whole column, identified by its status.
    Column(Status),
    /// Another task card.
    Task(TaskId),
}

impl DropTarget {
    /// Parses a droppable id: a status key is a column, a UUID is a card.
    ///
    /// Returns `None` for ids that name neither.
    pub fn parse(droppable_id: &str) -> Option<Self> {
        let trimmed = droppable_id.trim();
        if let Some(status) = Status::from_key(trimmed) {
            return Some(Self::Column(status));
        }
        Uuid::parse_str(trimmed).ok().map(Self::Task)
    }

    /// Droppable id in the same format [`DropTarget::parse`] accepts.
    pub fn droppable_id(&self) -> String {
        match self {
            Self::Column(status) => status.key().to_string(),
            Self::Task(id) => id.to_string(),
        }
    }
}

impl Display for DropTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Column(status) => write!(f, "column:{status}"),
            Self::Task(id) => write!(f, "task:{id}"),
        }
    }
}

/// Maps a completed drop to at most one store action.
///
/// - Column drop: `Move` when the status differs, otherwise nothing.
/// - Card drop in the same column: `Reorder` to the card's current index.
/// - Card drop in another column, on itself, or on a vanished card: nothing.
pub fn resolve_drop(tasks: &TaskList, active_id: TaskId, target: DropTarget) -> Option<Action> {
    let active = tasks.get(active_id)?;

    match target {
        DropTarget::Column(status) => (active.status != status).then_some(Action::Move {
            id: active_id,
            status,
        }),
        DropTarget::Task(over_id) => {
            if over_id == active_id {
                return None;
            }
            let over = tasks.get(over_id)?;
            if over.status != active.status {
                return None;
            }
            let to_index = tasks.index_in_status(over_id)?;
            Some(Action::Reorder {
                status: active.status,
                id: active_id,
                to_index: i64::try_from(to_index).ok()?,
            })
        }
    }
}
