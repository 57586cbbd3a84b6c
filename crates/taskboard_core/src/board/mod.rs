//! Column views derived from the flat task collection.
//!
//! # Responsibility
//! - Split the collection into the three fixed status columns for rendering.
//! - Flatten each task into the fields a card displays.
//!
//! # Invariants
//! - Derivation is pure; it never reorders relative to the store.
//! - Columns always come out in `Status::ALL` order, empty or not.

use crate::model::task::{Priority, Status, Task, TaskId};
use crate::store::reducer::TaskList;

/// Text shown in a column with no cards.
pub const EMPTY_COLUMN_PLACEHOLDER: &str = "No tasks";

/// One rendered column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView<'a> {
    pub status: Status,
    pub title: &'static str,
    pub tasks: Vec<&'a Task>,
}

impl<'a> ColumnView<'a> {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Placeholder text when the column has no cards.
    pub fn placeholder(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_COLUMN_PLACEHOLDER)
    }

    pub fn cards(&self) -> Vec<CardView> {
        self.tasks.iter().map(|task| CardView::from_task(task)).collect()
    }

    /// Droppable id of the column itself.
    pub fn droppable_id(&self) -> &'static str {
        self.status.key()
    }
}

/// Display fields of one task card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: TaskId,
    pub title: String,
    pub priority: Priority,
    pub assignee_name: Option<String>,
    pub due_date: Option<String>,
    pub file_name: Option<String>,
}

impl CardView {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            priority: task.priority,
            assignee_name: task.assignee.as_ref().map(|user| user.name.clone()),
            due_date: task.due_date.clone(),
            file_name: task.file.as_ref().map(|file| file.name.clone()),
        }
    }
}

/// Derives the three board columns in display order.
pub fn derive_columns(tasks: &TaskList) -> [ColumnView<'_>; 3] {
    Status::ALL.map(|status| column_for(tasks, status))
}

/// Derives a single column.
pub fn column_for(tasks: &TaskList, status: Status) -> ColumnView<'_> {
    ColumnView {
        status,
        title: status.title(),
        tasks: tasks.with_status(status).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{derive_columns, CardView, EMPTY_COLUMN_PLACEHOLDER};
    use crate::model::attachment::TaskFile;
    use crate::model::task::{Status, Task};
    use crate::model::user::User;
    use crate::store::reducer::TaskList;

    #[test]
    fn columns_filter_in_store_order() {
        let a = Task::new("a");
        let b = Task::new("b").with_status(Status::Done);
        let c = Task::new("c");
        let tasks = TaskList::from(vec![a.clone(), b.clone(), c.clone()]);

        let [todo, in_progress, done] = derive_columns(&tasks);
        assert_eq!(todo.tasks, vec![&a, &c]);
        assert_eq!(todo.title, "Todo");
        assert_eq!(done.tasks, vec![&b]);
        assert_eq!(in_progress.placeholder(), Some(EMPTY_COLUMN_PLACEHOLDER));
        assert_eq!(todo.placeholder(), None);
        assert_eq!(in_progress.droppable_id(), "inprogress");
    }

    #[test]
    fn card_view_flattens_optional_fields() {
        let mut task = Task::new("card");
        task.assignee = Some(User::new("u1", "Alice Johnson"));
        task.file = Some(TaskFile::from_bytes("brief.pdf", "application/pdf", b"%PDF"));
        task.due_date = Some("2026-12-01".to_string());

        let card = CardView::from_task(&task);
        assert_eq!(card.assignee_name.as_deref(), Some("Alice Johnson"));
        assert_eq!(card.file_name.as_deref(), Some("brief.pdf"));
        assert_eq!(card.due_date.as_deref(), Some("2026-12-01"));
    }
}
