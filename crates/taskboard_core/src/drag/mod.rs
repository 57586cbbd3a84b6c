//! Drag-and-drop interpretation.
//!
//! # Responsibility
//! - Turn pointer gestures over cards and columns into store actions.
//!
//! # Invariants
//! - Only column drops change a task's status.
//! - Card drops only reorder within the dragged task's own column.

pub mod interpreter;
pub mod target;

pub use interpreter::{
    DragInterpreter, DragPhase, DragResolution, PointerPosition, DEFAULT_ACTIVATION_DISTANCE_PX,
};
pub use target::{resolve_drop, DropTarget};
