// Task module
// Date-ranged task model with calendar-day granularity

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::date::days_inclusive;

/// Opaque, stable task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The fixed set of task categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskCategory {
    #[serde(rename = "To Do")]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Review")]
    Review,
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 4] = [
        TaskCategory::Todo,
        TaskCategory::InProgress,
        TaskCategory::Review,
        TaskCategory::Completed,
    ];

    /// Label used for display and for persistence.
    pub fn label(&self) -> &'static str {
        match self {
            TaskCategory::Todo => "To Do",
            TaskCategory::InProgress => "In Progress",
            TaskCategory::Review => "Review",
            TaskCategory::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for TaskCategory {
    type Err = TaskValidationError;

    /// Accepts the display label or a compact form (`todo`, `in-progress`, ...).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "todo" => Ok(TaskCategory::Todo),
            "inprogress" => Ok(TaskCategory::InProgress),
            "review" => Ok(TaskCategory::Review),
            "completed" | "done" => Ok(TaskCategory::Completed),
            _ => Err(TaskValidationError::UnknownCategory(value.to_string())),
        }
    }
}

/// Validation errors for tasks and drafts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskValidationError {
    #[error("Task name cannot be empty")]
    EmptyName,
    #[error("Task end date {end} is before start date {start}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
    #[error("Unknown task category: {0}")]
    UnknownCategory(String),
}

fn validate_fields(
    name: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(), TaskValidationError> {
    if name.trim().is_empty() {
        return Err(TaskValidationError::EmptyName);
    }
    if end_date < start_date {
        return Err(TaskValidationError::InvertedRange {
            start: start_date,
            end: end_date,
        });
    }
    Ok(())
}

/// A date-ranged task. Both dates are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub category: TaskCategory,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Task {
    /// Create a validated task.
    ///
    /// # Examples
    /// ```
    /// use rust_taskgrid::models::task::{Task, TaskCategory};
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
    /// let task = Task::new("t-1", "Write report", TaskCategory::Todo, start, end).unwrap();
    /// assert_eq!(task.duration_days(), 3);
    /// ```
    pub fn new(
        id: impl Into<TaskId>,
        name: impl Into<String>,
        category: TaskCategory,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            id: id.into(),
            name: name.into(),
            category,
            start_date,
            end_date,
        };
        task.validate()?;
        Ok(task)
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_fields(&self.name, self.start_date, self.end_date)
    }

    /// Inclusive day count; a same-day task lasts one day.
    pub fn duration_days(&self) -> i64 {
        days_inclusive(self.start_date, self.end_date)
    }

    /// True when the task's range intersects `[start, end]`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Copy of this task with new dates.
    pub fn with_dates(&self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            ..self.clone()
        }
    }

    /// Copy of this task with every editable field replaced.
    pub fn with_fields(&self, fields: TaskDraft) -> Self {
        Self {
            id: self.id.clone(),
            name: fields.name,
            category: fields.category,
            start_date: fields.start_date,
            end_date: fields.end_date,
        }
    }
}

/// Task fields without an identity, as submitted for creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub name: String,
    pub category: TaskCategory,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl TaskDraft {
    pub fn new(
        name: impl Into<String>,
        category: TaskCategory,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            start_date,
            end_date,
        }
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_fields(&self.name, self.start_date, self.end_date)
    }

    /// Attach an identity, producing a full task.
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            name: self.name,
            category: self.category,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}
