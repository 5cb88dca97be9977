use std::time::Duration;

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::schema;

/// Time a writer waits on a locked task database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(2);

/// Owner of the task database connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the task database at `path`. `":memory:"` gives a
    /// private in-memory database.
    ///
    /// # Examples
    /// ```
    /// use rust_taskgrid::services::database::Database;
    /// let db = Database::new(":memory:").unwrap();
    /// db.initialize_schema().unwrap();
    /// assert_eq!(db.schema_version().unwrap(), 1);
    /// ```
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open task database at {}", path))?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .context("Failed to set busy timeout")?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Create the `tasks` table and indexes if missing.
    pub fn initialize_schema(&self) -> Result<()> {
        schema::initialize_schema(&self.conn)
    }

    /// `PRAGMA user_version` as stamped by [`Database::initialize_schema`].
    pub fn schema_version(&self) -> Result<u32> {
        self.conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .context("Failed to read schema version")
    }
}
