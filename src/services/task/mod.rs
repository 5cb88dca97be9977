//! Task store collaborators.
//!
//! The engine talks to persistence only through [`TaskStore`]. Two stores
//! ship with the crate: [`InMemoryTaskStore`] and the SQLite-backed
//! [`SqliteTaskStore`], whose queries live on [`TaskService`] across the
//! `crud` and `queries` submodules.

use anyhow::Result;
use rusqlite::Connection;

use crate::models::task::{Task, TaskDraft, TaskId};

pub mod crud;
pub mod json;
mod memory;
pub mod queries;
mod shared;
mod sqlite;

pub use memory::InMemoryTaskStore;
pub use sqlite::SqliteTaskStore;

/// Persistence interface consumed by the engine.
///
/// `update_task` and `delete_task` are no-ops for unknown ids.
#[cfg_attr(test, mockall::automock)]
pub trait TaskStore {
    fn list_tasks(&self) -> Result<Vec<Task>>;
    fn create_task(&mut self, draft: TaskDraft) -> Result<Task>;
    fn update_task(&mut self, task: &Task) -> Result<()>;
    fn delete_task(&mut self, id: &TaskId) -> Result<()>;
}

/// Service for tasks stored in SQLite.
pub struct TaskService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> TaskService<'a> {
    /// Create a new TaskService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::TaskCategory;
    use crate::services::database::Database;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rusqlite::types::Type;

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn sample_draft() -> TaskDraft {
        TaskDraft::new("Write report", TaskCategory::Todo, date(4), date(6))
    }

    #[test]
    fn test_create_task() {
        let db = setup_test_db();
        let service = TaskService::new(db.connection());

        let created = service.create(sample_draft()).unwrap();
        assert!(!created.id.as_str().is_empty());
        assert_eq!(created.name, "Write report");
        assert_eq!(created.start_date, date(4));
    }

    #[test]
    fn test_create_rejects_invalid_draft() {
        let db = setup_test_db();
        let service = TaskService::new(db.connection());

        let draft = TaskDraft::new("", TaskCategory::Todo, date(4), date(6));
        assert!(service.create(draft).is_err());
        let draft = TaskDraft::new("Backwards", TaskCategory::Todo, date(6), date(4));
        assert!(service.create(draft).is_err());
        assert!(service.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_get_task() {
        let db = setup_test_db();
        let service = TaskService::new(db.connection());

        let created = service.create(sample_draft()).unwrap();
        let found = service.get(&created.id).unwrap();
        assert_eq!(found, Some(created));
    }

    #[test]
    fn test_get_nonexistent_task() {
        let db = setup_test_db();
        let service = TaskService::new(db.connection());

        assert!(service.get(&TaskId::new("missing")).unwrap().is_none());
    }

    #[test]
    fn test_update_task() {
        let db = setup_test_db();
        let service = TaskService::new(db.connection());

        let mut task = service.create(sample_draft()).unwrap();
        task.name = "Final report".to_string();
        task.category = TaskCategory::Review;
        task.end_date = date(9);

        assert!(service.update(&task).unwrap());
        let updated = service.get(&task.id).unwrap().unwrap();
        assert_eq!(updated, task);
    }

    #[test]
    fn test_update_nonexistent_task_is_noop() {
        let db = setup_test_db();
        let service = TaskService::new(db.connection());

        let ghost = sample_draft().into_task(TaskId::new("ghost"));
        assert_eq!(service.update(&ghost).unwrap(), false);
        assert!(service.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete_task() {
        let db = setup_test_db();
        let service = TaskService::new(db.connection());

        let created = service.create(sample_draft()).unwrap();
        assert!(service.delete(&created.id).unwrap());
        assert!(service.get(&created.id).unwrap().is_none());
        assert_eq!(service.delete(&created.id).unwrap(), false);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let db = setup_test_db();
        let service = TaskService::new(db.connection());

        let late = service
            .create(TaskDraft::new("Late", TaskCategory::Todo, date(20), date(21)))
            .unwrap();
        let early = service
            .create(TaskDraft::new("Early", TaskCategory::Todo, date(1), date(2)))
            .unwrap();

        let ids: Vec<TaskId> = service.list_all().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![late.id, early.id]);
    }

    #[test]
    fn test_corrupt_row_is_a_read_error() {
        let db = setup_test_db();
        db.connection()
            .execute(
                "INSERT INTO tasks (id, name, category, start_date, end_date)
                 VALUES ('bad', 'Bad', 'To Do', 'not-a-date', 'zzz')",
                [],
            )
            .unwrap();
        let service = TaskService::new(db.connection());

        let err = service.list_all().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<rusqlite::Error>(),
            Some(rusqlite::Error::FromSqlConversionFailure(3, Type::Text, _))
        ));
    }

    #[test]
    fn test_unknown_category_is_a_read_error() {
        let db = setup_test_db();
        db.connection()
            .execute(
                "INSERT INTO tasks (id, name, category, start_date, end_date)
                 VALUES ('bad', 'Bad', 'Someday', '2024-03-01', '2024-03-02')",
                [],
            )
            .unwrap();
        let service = TaskService::new(db.connection());

        let err = service.get(&TaskId::new("bad")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<rusqlite::Error>(),
            Some(rusqlite::Error::FromSqlConversionFailure(2, Type::Text, _))
        ));
    }
}
