//! Error types for the store backend.

use thiserror::Error;

/// Result type for backend operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors that can occur in backend operations.
#[derive(Debug, Error)]
pub enum DbError {
    /// Error reported by SQLite.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error (creating the store's directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A row with this primary key already exists.
    #[error("duplicate id {id} in table {table}")]
    Duplicate { table: &'static str, id: i64 },

    /// A row does not match its table's column layout.
    #[error("schema mismatch: {0}")]
    Schema(String),

    /// A stored column value has an unexpected type.
    #[error("column {table}.{column}: expected {expected}")]
    Column {
        table: &'static str,
        column: String,
        expected: &'static str,
    },

    /// Another thread panicked while holding the connection.
    #[error("connection lock poisoned")]
    LockPoisoned,
}
