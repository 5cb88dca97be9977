//! Typed pointer input and the engine's per-event result.

use chrono::NaiveDate;

use crate::gestures::{DateRange, DragKind};
use crate::grid::PointerPos;
use crate::models::task::{Task, TaskId};

/// What the host hit-tested under a pointer press.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    /// An empty part of a day cell.
    Cell(NaiveDate),
    /// A task segment: its body or one of its edge handles.
    Task { id: TaskId, kind: DragKind },
    /// Anything outside the grid.
    Outside,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Down { pos: PointerPos, target: PointerTarget },
    /// `cell` is the day cell under the pointer, if any.
    Move { pos: PointerPos, cell: Option<NaiveDate> },
    Up { pos: PointerPos },
    /// Pointer capture lost (left the viewport).
    Leave,
}

/// Result of routing one pointer event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionOutcome {
    Ignored,
    SelectionChanged(DateRange),
    /// Selection committed; the edit dialog was asked to create a task.
    CreateRequested(DateRange),
    DragArmed(TaskId),
    /// Live candidate while dragging.
    DragPreview(Task),
    /// A drag was committed to the store.
    TaskCommitted(Task),
    /// The store rejected a drag commit; the original task stands.
    CommitFailed(TaskId),
    /// A drag ended where it started.
    DragNoChange(TaskId),
    /// A click on a task; the edit dialog was asked to edit it.
    EditRequested(TaskId),
}
