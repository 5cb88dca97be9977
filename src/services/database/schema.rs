use anyhow::{Context, Result};
use rusqlite::Connection;

/// Bumped whenever the `tasks` layout changes.
pub const SCHEMA_VERSION: u32 = 1;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_tasks_table(conn)?;
    create_task_indexes(conn)?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)
        .context("Failed to stamp schema version")?;
    Ok(())
}

fn create_tasks_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (start_date <= end_date)
        )",
        [],
    )
    .context("Failed to create tasks table")?;

    Ok(())
}

fn create_task_indexes(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tasks_dates ON tasks (start_date, end_date)",
        [],
    )
    .context("Failed to create task date index")?;

    Ok(())
}
