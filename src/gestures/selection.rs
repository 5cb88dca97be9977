//! Range selection over day cells.
//!
//! `Idle -> Selecting -> Idle`. A press on an empty cell anchors the range,
//! moves extend it in either direction, and release (or the pointer leaving
//! the viewport) commits the ordered range for task creation.

use chrono::NaiveDate;

use super::capture::CaptureGuard;
use crate::utils::date::days_inclusive;

/// Ordered, inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range from two dates in any order.
    pub fn between(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> i64 {
        days_inclusive(self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Selecting,
}

#[derive(Debug)]
struct SelectionSession {
    anchor: NaiveDate,
    current: NaiveDate,
    _capture: CaptureGuard,
}

impl SelectionSession {
    fn range(&self) -> DateRange {
        DateRange::between(self.anchor, self.current)
    }
}

#[derive(Debug, Default)]
pub struct SelectionGesture {
    session: Option<SelectionSession>,
}

impl SelectionGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        if self.session.is_some() {
            SelectionState::Selecting
        } else {
            SelectionState::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Start selecting at `date`. Returns false (and stays idle) when the
    /// press landed on an existing task. `acquire` is only called when the
    /// selection actually starts.
    pub fn pointer_down<F>(&mut self, date: NaiveDate, over_task: bool, acquire: F) -> bool
    where
        F: FnOnce() -> CaptureGuard,
    {
        if over_task {
            log::debug!("Selection not started: press on a task at {}", date);
            return false;
        }
        // Drop any previous session first so its capture is released before
        // the new one attaches.
        self.session = None;
        self.session = Some(SelectionSession {
            anchor: date,
            current: date,
            _capture: acquire(),
        });
        log::debug!("Selection started at {}", date);
        true
    }

    /// Extend the selection to `date`. Returns the new range if it changed.
    pub fn pointer_move(&mut self, date: NaiveDate) -> Option<DateRange> {
        let session = self.session.as_mut()?;
        if session.current == date {
            return None;
        }
        session.current = date;
        Some(session.range())
    }

    /// Commit the selection.
    pub fn pointer_up(&mut self) -> Option<DateRange> {
        let range = self.session.take()?.range();
        log::debug!("Selection committed: {} to {}", range.start, range.end);
        Some(range)
    }

    /// Losing the pointer commits the current range rather than dropping it.
    pub fn pointer_leave(&mut self) -> Option<DateRange> {
        self.pointer_up()
    }

    /// Abandon the selection without committing.
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            log::debug!("Selection cancelled");
        }
    }

    pub fn range(&self) -> Option<DateRange> {
        self.session.as_ref().map(SelectionSession::range)
    }

    pub fn is_highlighted(&self, date: NaiveDate) -> bool {
        self.range().map_or(false, |range| range.contains(date))
    }
}
