use anyhow::Result;
use uuid::Uuid;

use super::TaskStore;
use crate::models::task::{Task, TaskDraft, TaskId};

/// Process-local [`TaskStore`] keeping tasks in insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskStore {
    tasks: Vec<Task>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing tasks, keeping their ids.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }
}

impl TaskStore for InMemoryTaskStore {
    fn list_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn create_task(&mut self, draft: TaskDraft) -> Result<Task> {
        draft.validate()?;
        let task = draft.into_task(TaskId::new(Uuid::new_v4().to_string()));
        self.tasks.push(task.clone());
        Ok(task)
    }

    fn update_task(&mut self, task: &Task) -> Result<()> {
        task.validate()?;
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => *existing = task.clone(),
            None => log::debug!("Update ignored: no task with id {}", task.id),
        }
        Ok(())
    }

    fn delete_task(&mut self, id: &TaskId) -> Result<()> {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        if self.tasks.len() == before {
            log::debug!("Delete ignored: no task with id {}", id);
        }
        Ok(())
    }
}
