use super::shared::{map_task_row, TASK_COLUMNS};
use super::TaskService;
use crate::models::task::Task;
use anyhow::Result;

impl<'a> TaskService<'a> {
    /// List every task in insertion order.
    pub fn list_all(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM tasks ORDER BY rowid ASC",
            TASK_COLUMNS
        ))?;

        let tasks = stmt
            .query_map([], map_task_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(tasks)
    }
}
