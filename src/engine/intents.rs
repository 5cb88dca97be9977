//! Mutation intents and the edit-dialog collaborator.

use chrono::NaiveDate;

use crate::models::task::{Task, TaskDraft, TaskId};

/// Typed mutations the engine sends to the task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskIntent {
    Create(TaskDraft),
    /// Replace by id (move, resize, or edit).
    Update(Task),
    Delete(TaskId),
}

/// Proposed values for the edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// `None` when creating a new task.
    pub existing: Option<Task>,
}

impl EditRequest {
    pub fn create(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            existing: None,
        }
    }

    pub fn edit(task: Task) -> Self {
        Self {
            start_date: task.start_date,
            end_date: task.end_date,
            existing: Some(task),
        }
    }

    pub fn is_create(&self) -> bool {
        self.existing.is_none()
    }
}

/// What the edit dialog handed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Save(TaskDraft),
    Cancel,
    /// Delete the task being edited; `confirmed` is false when the user
    /// declined the confirmation prompt.
    Delete { confirmed: bool },
}

/// Opens the create/edit form. The result comes back through
/// [`Engine::finish_edit`](super::Engine::finish_edit).
#[cfg_attr(test, mockall::automock)]
pub trait EditDialog {
    fn open(&mut self, request: &EditRequest);
}

/// Dialog stand-in for hosts that read [`Engine::pending_edit`](super::Engine::pending_edit) instead.
#[derive(Debug, Default)]
pub struct DeferredEditDialog;

impl EditDialog for DeferredEditDialog {
    fn open(&mut self, request: &EditRequest) {
        log::debug!(
            "Edit requested for {} to {} ({})",
            request.start_date,
            request.end_date,
            if request.is_create() { "new task" } else { "existing task" }
        );
    }
}
