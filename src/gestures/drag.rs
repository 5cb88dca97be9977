// Task drag system
//
// Moves a task by dragging its body, or resizes it by dragging the handle on
// its left (start) or right (end) edge. Pointer displacement snaps to whole
// days using the measured cell width.
//
// Idle -> Armed (pressed, below threshold) -> Dragging -> Idle

use chrono::NaiveDate;

use super::capture::CaptureGuard;
use crate::grid::geometry::{pixels_to_days, PointerPos};
use crate::models::task::Task;
use crate::utils::date::add_days;

/// Default pointer travel before a press becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD_PX: f32 = 5.0;

/// Which part of the task was grabbed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragKind {
    /// Task body: shift both dates.
    Move,
    /// Left handle: adjust the start date.
    ResizeStart,
    /// Right handle: adjust the end date.
    ResizeEnd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Armed,
    Dragging,
}

/// What a release (or pointer leave) produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragRelease {
    /// No gesture was in progress.
    Idle,
    /// Released before the threshold: open the task for editing.
    Click(Task),
    /// Commit the final candidate.
    Commit { original: Task, updated: Task },
    /// Dragged, but back to the original dates.
    NoChange(Task),
    /// Pointer lost before the threshold: nothing to commit or edit.
    Abandoned(Task),
}

#[derive(Debug)]
struct DragSession {
    task: Task,
    kind: DragKind,
    origin: PointerPos,
    dragging: bool,
    candidate: (NaiveDate, NaiveDate),
    _capture: CaptureGuard,
}

impl DragSession {
    fn candidate_task(&self) -> Task {
        self.task.with_dates(self.candidate.0, self.candidate.1)
    }

    fn is_unchanged(&self) -> bool {
        self.candidate == (self.task.start_date, self.task.end_date)
    }
}

/// Candidate dates for `task` after a `days` displacement of `kind`.
///
/// Resizes keep at least a one-day gap between start and end; a task that is
/// already a single day may not be shrunk past itself. Returns `None` when no
/// valid range exists.
pub fn candidate_dates(task: &Task, kind: DragKind, days: i64) -> Option<(NaiveDate, NaiveDate)> {
    let (start, end) = (task.start_date, task.end_date);
    let (new_start, new_end) = match kind {
        DragKind::Move => (add_days(start, days), add_days(end, days)),
        DragKind::ResizeStart => {
            let latest = if end > start { add_days(end, -1) } else { end };
            (add_days(start, days).min(latest), end)
        }
        DragKind::ResizeEnd => {
            let earliest = if end > start { add_days(start, 1) } else { start };
            (start, add_days(end, days).max(earliest))
        }
    };
    (new_start <= new_end).then_some((new_start, new_end))
}

pub struct DragGesture {
    threshold_px: f32,
    session: Option<DragSession>,
}

impl Default for DragGesture {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD_PX)
    }
}

impl DragGesture {
    pub fn new(threshold_px: f32) -> Self {
        Self {
            threshold_px,
            session: None,
        }
    }

    pub fn set_threshold(&mut self, threshold_px: f32) {
        self.threshold_px = threshold_px;
    }

    pub fn state(&self) -> DragState {
        match &self.session {
            None => DragState::Idle,
            Some(session) if session.dragging => DragState::Dragging,
            Some(_) => DragState::Armed,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn kind(&self) -> Option<DragKind> {
        self.session.as_ref().map(|session| session.kind)
    }

    /// The task as it was when pressed.
    pub fn original(&self) -> Option<&Task> {
        self.session.as_ref().map(|session| &session.task)
    }

    /// The candidate task while dragging.
    pub fn preview(&self) -> Option<Task> {
        self.session
            .as_ref()
            .filter(|session| session.dragging)
            .map(DragSession::candidate_task)
    }

    /// Arm a drag on `task`. Nothing is mutated until the threshold is crossed.
    pub fn pointer_down(&mut self, task: Task, kind: DragKind, origin: PointerPos, capture: CaptureGuard) {
        self.session = None;
        log::debug!("Drag armed on task {} ({:?})", task.id, kind);
        self.session = Some(DragSession {
            candidate: (task.start_date, task.end_date),
            task,
            kind,
            origin,
            dragging: false,
            _capture: capture,
        });
    }

    /// Track the pointer. Returns the new candidate task whenever it changes.
    pub fn pointer_move(&mut self, pos: PointerPos, cell_width: f32) -> Option<Task> {
        let threshold = self.threshold_px;
        let session = self.session.as_mut()?;

        if !session.dragging {
            if session.origin.distance_to(pos) <= threshold {
                return None;
            }
            session.dragging = true;
            log::debug!("Drag started on task {}", session.task.id);
        }

        let days = pixels_to_days(pos.x - session.origin.x, cell_width);
        let candidate = candidate_dates(&session.task, session.kind, days)?;
        if candidate == session.candidate {
            return None;
        }
        session.candidate = candidate;
        Some(session.candidate_task())
    }

    pub fn pointer_up(&mut self) -> DragRelease {
        let Some(session) = self.session.take() else {
            return DragRelease::Idle;
        };
        if !session.dragging {
            return DragRelease::Click(session.task);
        }
        if session.is_unchanged() {
            log::debug!("Drag on task {} released without displacement", session.task.id);
            return DragRelease::NoChange(session.task);
        }
        let updated = session.candidate_task();
        DragRelease::Commit {
            original: session.task,
            updated,
        }
    }

    /// Losing the pointer commits the last valid candidate. An armed press
    /// that never became a drag is abandoned.
    pub fn pointer_leave(&mut self) -> DragRelease {
        if self.state() == DragState::Armed {
            if let Some(session) = self.session.take() {
                return DragRelease::Abandoned(session.task);
            }
        }
        self.pointer_up()
    }

    /// Drop the session and hand back the original task.
    pub fn cancel(&mut self) -> Option<Task> {
        self.session.take().map(|session| session.task)
    }
}
