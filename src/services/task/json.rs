//! JSON import/export of task records.
//!
//! Records use the persisted shape
//! `{ id, name, startDate, endDate, category }` with ISO-8601 dates.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::task::Task;

pub fn tasks_to_json(tasks: &[Task]) -> Result<String> {
    serde_json::to_string_pretty(tasks).context("Failed to serialize tasks")
}

/// Parse and validate task records.
pub fn tasks_from_json(data: &str) -> Result<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(data).context("Failed to parse task records")?;
    for task in &tasks {
        task.validate()
            .with_context(|| format!("invalid task record {}", task.id))?;
    }
    Ok(tasks)
}

pub fn export_tasks(path: &Path, tasks: &[Task]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create dir {}", parent.display()))?;
    }
    fs::write(path, tasks_to_json(tasks)?)
        .with_context(|| format!("Failed to write tasks to {}", path.display()))
}

pub fn import_tasks(path: &Path) -> Result<Vec<Task>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read tasks from {}", path.display()))?;
    tasks_from_json(&data)
}
