use anyhow::Result;

use super::{TaskService, TaskStore};
use crate::models::task::{Task, TaskDraft, TaskId};
use crate::services::database::Database;

/// [`TaskStore`] backed by a SQLite database.
pub struct SqliteTaskStore {
    db: Database,
}

impl SqliteTaskStore {
    /// Open the database at `path` and make sure the schema exists.
    pub fn open(path: &str) -> Result<Self> {
        let db = Database::new(path)?;
        db.initialize_schema()?;
        Ok(Self { db })
    }

    pub fn service(&self) -> TaskService<'_> {
        TaskService::new(self.db.connection())
    }
}

impl TaskStore for SqliteTaskStore {
    fn list_tasks(&self) -> Result<Vec<Task>> {
        self.service().list_all()
    }

    fn create_task(&mut self, draft: TaskDraft) -> Result<Task> {
        self.service().create(draft)
    }

    fn update_task(&mut self, task: &Task) -> Result<()> {
        if !self.service().update(task)? {
            log::debug!("Update ignored: no task with id {}", task.id);
        }
        Ok(())
    }

    fn delete_task(&mut self, id: &TaskId) -> Result<()> {
        if !self.service().delete(id)? {
            log::debug!("Delete ignored: no task with id {}", id);
        }
        Ok(())
    }
}
