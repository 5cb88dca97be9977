// Database service module
// SQLite connection and schema management for persisted tasks

mod connection;
pub mod schema;

pub use connection::Database;
