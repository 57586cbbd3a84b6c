//! Pointer gesture state machine.
//!
//! # Responsibility
//! - Track one drag gesture from press to release.
//! - Separate clicks from drags with an activation distance.
//!
//! # Invariants
//! - At most one gesture is tracked at a time.
//! - Every release or cancel returns the machine to `Idle`.
//! - The interpreter owns no task data; it only reads the collection
//!   handed to [`DragInterpreter::pointer_up`].

use crate::drag::target::{resolve_drop, DropTarget};
use crate::model::task::TaskId;
use crate::store::action::Action;
use crate::store::reducer::TaskList;
use log::debug;

/// Pointer travel, in pixels, that turns a press into a drag.
pub const DEFAULT_ACTIVATION_DISTANCE_PX: f64 = 5.0;

/// Pointer coordinates in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: PointerPosition) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Current gesture phase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pressed on a card, below the activation distance.
    Pending {
        task_id: TaskId,
        origin: PointerPosition,
    },
    /// Activated drag.
    Dragging {
        task_id: TaskId,
        origin: PointerPosition,
        current: PointerPosition,
    },
}

/// How a gesture ended.
#[derive(Debug, Clone, PartialEq)]
pub enum DragResolution {
    /// Release or cancel with no gesture in progress.
    Ignored,
    /// Released before activation; a plain click on the card.
    Click { task_id: TaskId },
    /// Released over no target, or aborted.
    Cancelled { task_id: TaskId },
    /// Released over a target. `action` is `None` when the drop changes nothing.
    Dropped {
        task_id: TaskId,
        target: DropTarget,
        action: Option<Action>,
    },
}

impl DragResolution {
    /// The store action to dispatch, if any.
    pub fn action(&self) -> Option<&Action> {
        match self {
            Self::Dropped { action, .. } => action.as_ref(),
            _ => None,
        }
    }
}

/// Drag-and-drop interpreter for one board.
#[derive(Debug, Clone)]
pub struct DragInterpreter {
    activation_distance: f64,
    phase: DragPhase,
}

impl Default for DragInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl DragInterpreter {
    pub fn new() -> Self {
        Self::with_activation_distance(DEFAULT_ACTIVATION_DISTANCE_PX)
    }

    /// Negative or NaN distances are treated as zero.
    pub fn with_activation_distance(distance_px: f64) -> Self {
        let activation_distance = if distance_px.is_nan() {
            0.0
        } else {
            distance_px.max(0.0)
        };
        Self {
            activation_distance,
            phase: DragPhase::Idle,
        }
    }

    pub fn activation_distance(&self) -> f64 {
        self.activation_distance
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Task under the pointer, pending or dragging.
    pub fn active_task(&self) -> Option<TaskId> {
        match self.phase {
            DragPhase::Idle => None,
            DragPhase::Pending { task_id, .. } | DragPhase::Dragging { task_id, .. } => {
                Some(task_id)
            }
        }
    }

    /// Pointer pressed on a card. Replaces any unfinished gesture.
    pub fn pointer_down(&mut self, task_id: TaskId, at: PointerPosition) {
        if let Some(previous) = self.active_task() {
            debug!("event=drag_start module=drag status=replace previous_task_id={previous}");
        }
        self.phase = DragPhase::Pending {
            task_id,
            origin: at,
        };
    }

    /// Pointer moved. Returns `true` on the move that activates the drag.
    pub fn pointer_move(&mut self, at: PointerPosition) -> bool {
        match self.phase {
            DragPhase::Idle => false,
            DragPhase::Pending { task_id, origin } => {
                if origin.distance_to(at) > self.activation_distance {
                    self.phase = DragPhase::Dragging {
                        task_id,
                        origin,
                        current: at,
                    };
                    debug!("event=drag_start module=drag status=ok task_id={task_id}");
                    true
                } else {
                    false
                }
            }
            DragPhase::Dragging {
                task_id, origin, ..
            } => {
                self.phase = DragPhase::Dragging {
                    task_id,
                    origin,
                    current: at,
                };
                false
            }
        }
    }

    /// Pointer released, optionally over a drop target.
    pub fn pointer_up(&mut self, over: Option<DropTarget>, tasks: &TaskList) -> DragResolution {
        let phase = std::mem::take(&mut self.phase);
        match (phase, over) {
            (DragPhase::Idle, _) => DragResolution::Ignored,
            (DragPhase::Pending { task_id, .. }, _) => DragResolution::Click { task_id },
            (DragPhase::Dragging { task_id, .. }, None) => {
                debug!("event=drag_drop module=drag status=cancelled task_id={task_id}");
                DragResolution::Cancelled { task_id }
            }
            (DragPhase::Dragging { task_id, .. }, Some(target)) => {
                let action = resolve_drop(tasks, task_id, target);
                debug!(
                    "event=drag_drop module=drag status=ok task_id={} target={} action={}",
                    task_id,
                    target,
                    action.as_ref().map_or("none", Action::name)
                );
                DragResolution::Dropped {
                    task_id,
                    target,
                    action,
                }
            }
        }
    }

    /// Aborts the current gesture (e.g. Escape key, pointer capture lost).
    pub fn cancel(&mut self) -> DragResolution {
        match std::mem::take(&mut self.phase) {
            DragPhase::Idle => DragResolution::Ignored,
            DragPhase::Pending { task_id, .. } | DragPhase::Dragging { task_id, .. } => {
                debug!("event=drag_drop module=drag status=cancelled task_id={task_id}");
                DragResolution::Cancelled { task_id }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DragInterpreter, DragPhase, DragResolution, PointerPosition};
    use crate::drag::target::DropTarget;
    use crate::model::task::{Status, Task};
    use crate::store::action::Action;
    use crate::store::reducer::TaskList;

    #[test]
    fn movement_within_threshold_stays_pending() {
        let task = Task::new("x");
        let mut drag = DragInterpreter::new();
        drag.pointer_down(task.id, PointerPosition::new(10.0, 10.0));

        assert!(!drag.pointer_move(PointerPosition::new(13.0, 14.0)));
        assert!(matches!(drag.phase(), DragPhase::Pending { .. }));
        assert!(drag.pointer_move(PointerPosition::new(14.0, 14.0)));
        assert!(drag.is_dragging());
    }

    #[test]
    fn release_before_activation_is_a_click() {
        let task = Task::new("x");
        let tasks = TaskList::from(vec![task.clone()]);
        let mut drag = DragInterpreter::new();
        drag.pointer_down(task.id, PointerPosition::default());

        let resolution = drag.pointer_up(Some(DropTarget::Column(Status::Done)), &tasks);
        assert_eq!(resolution, DragResolution::Click { task_id: task.id });
        assert_eq!(drag.phase(), DragPhase::Idle);
    }

    #[test]
    fn release_over_nothing_cancels() {
        let task = Task::new("x");
        let tasks = TaskList::from(vec![task.clone()]);
        let mut drag = DragInterpreter::with_activation_distance(0.0);
        drag.pointer_down(task.id, PointerPosition::default());
        drag.pointer_move(PointerPosition::new(1.0, 0.0));

        assert_eq!(
            drag.pointer_up(None, &tasks),
            DragResolution::Cancelled { task_id: task.id }
        );
        assert_eq!(drag.active_task(), None);
    }

    #[test]
    fn drop_on_column_resolves_move() {
        let task = Task::new("x");
        let tasks = TaskList::from(vec![task.clone()]);
        let mut drag = DragInterpreter::new();
        drag.pointer_down(task.id, PointerPosition::default());
        drag.pointer_move(PointerPosition::new(0.0, 40.0));

        let resolution = drag.pointer_up(Some(DropTarget::Column(Status::Done)), &tasks);
        assert_eq!(
            resolution.action(),
            Some(&Action::Move {
                id: task.id,
                status: Status::Done,
            })
        );
    }

    #[test]
    fn cancel_without_gesture_is_ignored() {
        let mut drag = DragInterpreter::new();
        assert_eq!(drag.cancel(), DragResolution::Ignored);
        assert_eq!(
            drag.pointer_up(None, &TaskList::new()),
            DragResolution::Ignored
        );
    }

    #[test]
    fn invalid_activation_distance_is_clamped() {
        assert_eq!(DragInterpreter::with_activation_distance(-3.0).activation_distance(), 0.0);
        assert_eq!(
            DragInterpreter::with_activation_distance(f64::NAN).activation_distance(),
            0.0
        );
    }
}
