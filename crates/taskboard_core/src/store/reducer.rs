//! Ordered task collection and the pure reducer over it.
//!
//! # Responsibility
//! - Hold tasks in one flat sequence that is partitioned by status.
//! - Compute the next collection value for every [`Action`].
//!
//! # Invariants
//! - `reduce` never mutates its input; it returns `None` for no-ops.
//! - Relative order inside a status partition only changes for the task an
//!   action targets.
//! - Interleaving of different statuses in the flat sequence carries no
//!   meaning.

use crate::model::task::{Status, Task, TaskId};
use crate::store::action::Action;
use serde::{Deserialize, Serialize};

/// Flat, ordered collection of tasks.
///
/// Serialized as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList(Vec<Task>);

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.0
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.0.iter().find(|task| task.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Tasks of one status, in column order.
    pub fn with_status(&self, status: Status) -> impl Iterator<Item = &Task> + '_ {
        self.0.iter().filter(move |task| task.status == status)
    }

    /// Position of `id` inside its status partition.
    pub fn index_in_status(&self, id: TaskId) -> Option<usize> {
        let status = self.get(id)?.status;
        self.with_status(status).position(|task| task.id == id)
    }

    /// Applies `action`, returning the unchanged list for no-ops.
    pub fn apply(&self, action: &Action) -> TaskList {
        reduce(self, action).unwrap_or_else(|| self.clone())
    }

    pub fn into_vec(self) -> Vec<Task> {
        self.0
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(value: Vec<Task>) -> Self {
        Self(value)
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Computes the state that follows `action`.
///
/// Returns `None` when the action does not change anything: unknown ids,
/// a move to the status the task already has, a stale reorder, or a reorder
/// to the current position.
pub fn reduce(state: &TaskList, action: &Action) -> Option<TaskList> {
    match action {
        Action::Add(task) => Some(add(&state.0, task)),
        Action::Update(task) => update(&state.0, task),
        Action::Move { id, status } => move_to_status(&state.0, *id, *status),
        Action::Delete { id } => delete(&state.0, *id),
        Action::Reorder {
            status,
            id,
            to_index,
        } => reorder(&state.0, *status, *id, *to_index),
    }
}

fn add(tasks: &[Task], task: &Task) -> TaskList {
    let mut next = Vec::with_capacity(tasks.len() + 1);
    next.push(task.clone());
    next.extend(tasks.iter().filter(|existing| existing.id != task.id).cloned());
    TaskList(next)
}

fn update(tasks: &[Task], task: &Task) -> Option<TaskList> {
    let position = tasks.iter().position(|existing| existing.id == task.id)?;
    let mut next = tasks.to_vec();
    next[position] = task.clone();
    Some(TaskList(next))
}

fn move_to_status(tasks: &[Task], id: TaskId, status: Status) -> Option<TaskList> {
    let position = tasks.iter().position(|task| task.id == id)?;
    if tasks[position].status == status {
        return None;
    }

    // Pushing to the flat end appends to the destination column.
    let mut next = tasks.to_vec();
    let mut moved = next.remove(position);
    moved.status = status;
    next.push(moved);
    Some(TaskList(next))
}

fn delete(tasks: &[Task], id: TaskId) -> Option<TaskList> {
    if !tasks.iter().any(|task| task.id == id) {
        return None;
    }
    Some(tasks.iter().filter(|task| task.id != id).cloned().collect())
}

fn reorder(tasks: &[Task], status: Status, id: TaskId, to_index: i64) -> Option<TaskList> {
    let slots: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| task.status == status)
        .map(|(index, _)| index)
        .collect();

    let global_index = tasks.iter().position(|task| task.id == id)?;
    // Stale request: the task is no longer in `status`.
    let from = slots.iter().position(|&slot| slot == global_index)?;
    let to = clamp_index(to_index, slots.len());
    if from == to {
        return None;
    }

    let mut order = slots.clone();
    let moved = order.remove(from);
    order.insert(to, moved);

    let mut next = tasks.to_vec();
    for (slot, source) in slots.iter().zip(order) {
        next[*slot] = tasks[source].clone();
    }
    Some(TaskList(next))
}

/// Clamps a signed index into `[0, len - 1]`. `len` must be non-zero.
fn clamp_index(index: i64, len: usize) -> usize {
    let last = len.saturating_sub(1);
    if index <= 0 {
        0
    } else {
        usize::try_from(index).map_or(last, |value| value.min(last))
    }
}

#[cfg(test)]
mod tests {
    use super::{clamp_index, reduce, TaskList};
    use crate::model::task::{Status, Task};
    use crate::store::action::Action;
    use uuid::Uuid;

    fn task(title: &str, status: Status) -> Task {
        Task::with_id(Uuid::new_v4(), title, 0).with_status(status)
    }

    fn titles(list: &TaskList, status: Status) -> Vec<String> {
        list.with_status(status).map(|t| t.title.clone()).collect()
    }

    #[test]
    fn clamp_index_handles_extremes() {
        assert_eq!(clamp_index(-5, 3), 0);
        assert_eq!(clamp_index(1, 3), 1);
        assert_eq!(clamp_index(3, 3), 2);
        assert_eq!(clamp_index(i64::MAX, 3), 2);
    }

    #[test]
    fn reorder_keeps_other_status_slots_in_place() {
        let a = task("a", Status::Todo);
        let b = task("b", Status::Done);
        let c = task("c", Status::Todo);
        let d = task("d", Status::Done);
        let e = task("e", Status::Todo);
        let list = TaskList::from(vec![a.clone(), b.clone(), c, d.clone(), e.clone()]);

        let next = reduce(
            &list,
            &Action::Reorder {
                status: Status::Todo,
                id: e.id,
                to_index: 0,
            },
        )
        .unwrap();

        assert_eq!(titles(&next, Status::Todo), vec!["e", "a", "c"]);
        assert_eq!(next.as_slice()[1], b);
        assert_eq!(next.as_slice()[3], d);
        assert_eq!(next.as_slice()[0].id, e.id);
        assert_eq!(next.as_slice()[2].id, a.id);
    }

    #[test]
    fn move_appends_to_destination_column() {
        let a = task("a", Status::Todo);
        let b = task("b", Status::Done);
        let c = task("c", Status::Done);
        let list = TaskList::from(vec![a.clone(), b, c]);

        let next = reduce(
            &list,
            &Action::Move {
                id: a.id,
                status: Status::Done,
            },
        )
        .unwrap();
        assert_eq!(titles(&next, Status::Done), vec!["b", "c", "a"]);
        assert!(titles(&next, Status::Todo).is_empty());
    }

    #[test]
    fn move_to_same_status_is_noop() {
        let a = task("a", Status::Todo);
        let list = TaskList::from(vec![a.clone()]);
        let action = Action::Move {
            id: a.id,
            status: Status::Todo,
        };
        assert_eq!(reduce(&list, &action), None);
        assert_eq!(list.apply(&action), list);
    }

    #[test]
    fn index_in_status_ignores_other_columns() {
        let a = task("a", Status::Done);
        let b = task("b", Status::Todo);
        let c = task("c", Status::Todo);
        let list = TaskList::from(vec![a.clone(), b, c.clone()]);
        assert_eq!(list.index_in_status(c.id), Some(1));
        assert_eq!(list.index_in_status(a.id), Some(0));
        assert_eq!(list.index_in_status(Uuid::new_v4()), None);
    }
}
