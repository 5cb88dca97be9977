use super::shared::{format_date, map_task_row, TASK_COLUMNS};
use super::TaskService;
use crate::models::task::{Task, TaskDraft, TaskId};
use anyhow::{Context, Result};
use chrono::Local;
use rusqlite::{self, params};
use uuid::Uuid;

impl<'a> TaskService<'a> {
    /// Insert a new task, assigning it a fresh id.
    pub fn create(&self, draft: TaskDraft) -> Result<Task> {
        draft.validate()?;

        let task = draft.into_task(TaskId::new(Uuid::new_v4().to_string()));
        let now = Local::now().to_rfc3339();

        self.conn
            .execute(
                "INSERT INTO tasks (id, name, category, start_date, end_date, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                params![
                    task.id.as_str(),
                    task.name,
                    task.category.label(),
                    format_date(task.start_date),
                    format_date(task.end_date),
                    &now,
                    &now,
                ],
            )
            .context("Failed to insert task")?;

        Ok(task)
    }

    /// Insert or replace a task keeping its id (used by imports).
    pub fn save(&self, task: &Task) -> Result<()> {
        task.validate()?;

        let now = Local::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO tasks (id, name, category, start_date, end_date, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name, category = excluded.category,
                    start_date = excluded.start_date, end_date = excluded.end_date,
                    updated_at = excluded.updated_at",
                params![
                    task.id.as_str(),
                    task.name,
                    task.category.label(),
                    format_date(task.start_date),
                    format_date(task.end_date),
                    &now,
                ],
            )
            .context("Failed to save task")?;

        Ok(())
    }

    /// Retrieve a task by id.
    pub fn get(&self, id: &TaskId) -> Result<Option<Task>> {
        let result = self.conn.query_row(
            &format!("SELECT {} FROM tasks WHERE id = ?", TASK_COLUMNS),
            [id.as_str()],
            map_task_row,
        );

        match result {
            Ok(task) => Ok(Some(task)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace a task by id. Returns false when no task has that id.
    pub fn update(&self, task: &Task) -> Result<bool> {
        task.validate()?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE tasks SET
                    name = ?, category = ?, start_date = ?, end_date = ?, updated_at = ?
                 WHERE id = ?",
                params![
                    task.name,
                    task.category.label(),
                    format_date(task.start_date),
                    format_date(task.end_date),
                    Local::now().to_rfc3339(),
                    task.id.as_str(),
                ],
            )
            .context("Failed to update task")?;

        Ok(rows_affected > 0)
    }

    /// Delete a task by id. Returns false when no task has that id.
    pub fn delete(&self, id: &TaskId) -> Result<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?", [id.as_str()])
            .context("Failed to delete task")?;

        Ok(rows_affected > 0)
    }
}
