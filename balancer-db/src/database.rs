//! Connection management and row-level primitives.

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, ErrorCode, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info};

use crate::{DbError, DbResult, Row, Table};

/// How long a connection waits on a locked database before failing.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// One connection to a file-backed (or in-memory) SQLite store.
///
/// Concurrent writers in other connections are serialized by SQLite; this
/// connection waits up to its busy timeout for the write lock. WAL journaling
/// lets readers see the most recently committed state without blocking.
pub struct Database {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Database {
    /// Opens (or creates) the store at `path`, creating parent directories
    /// and the schema as needed.
    pub fn open(path: &Path, busy_timeout: Duration) -> DbResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(busy_timeout)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!(path = %path.display(), journal_mode = %mode, "Opened store connection");

        let db = Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        };
        db.init_schema()?;
        info!(path = %path.display(), "Store ready");
        Ok(db)
    }

    /// Opens a private in-memory store (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let db = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
            path: None,
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Backing file, or `None` for an in-memory store.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn conn(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::LockPoisoned)
    }

    fn init_schema(&self) -> DbResult<()> {
        let sql: String = Table::ALL.iter().map(Table::create_sql).collect();
        self.conn()?.execute_batch(&sql)?;
        Ok(())
    }

    /// Inserts a new row. Fails with [`DbError::Duplicate`] if the id is taken.
    pub fn insert(&self, row: &Row) -> DbResult<()> {
        let table = row.table();
        let values = row.ordered_values()?;
        let names: Vec<String> = table
            .columns()
            .iter()
            .map(|c| format!("\"{}\"", c.name))
            .collect();
        let placeholders: Vec<String> = (1..=values.len() + 2).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT INTO \"{}\" (\"id\", {}, \"extra\") VALUES ({})",
            table.name(),
            names.join(", "),
            placeholders.join(", ")
        );

        let id = Value::Integer(row.id());
        let extra = Value::Text(row.extra().to_string());
        let params = std::iter::once(&id).chain(values).chain(std::iter::once(&extra));

        let conn = self.conn()?;
        match conn.execute(&sql, params_from_iter(params)) {
            Ok(_) => {
                debug!(table = %table, id = row.id(), "Inserted row");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation
                    && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                Err(DbError::Duplicate {
                    table: table.name(),
                    id: row.id(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Rewrites every column of the row with `row.id()`.
    ///
    /// Returns `false` if no such row exists.
    pub fn update(&self, row: &Row) -> DbResult<bool> {
        let table = row.table();
        let values = row.ordered_values()?;
        let assignments: Vec<String> = table
            .columns()
            .iter()
            .enumerate()
            .map(|(i, c)| format!("\"{}\" = ?{}", c.name, i + 1))
            .collect();
        let n = values.len();
        let sql = format!(
            "UPDATE \"{}\" SET {}, \"extra\" = ?{} WHERE \"id\" = ?{}",
            table.name(),
            assignments.join(", "),
            n + 1,
            n + 2
        );

        let extra = Value::Text(row.extra().to_string());
        let id = Value::Integer(row.id());
        let params = values.into_iter().chain([&extra, &id]);

        let changed = self.conn()?.execute(&sql, params_from_iter(params))?;
        debug!(table = %table, id = row.id(), changed, "Updated row");
        Ok(changed > 0)
    }

    pub fn select_by_id(&self, table: Table, id: i64) -> DbResult<Option<Row>> {
        let sql = format!(
            "SELECT {} FROM \"{}\" WHERE \"id\" = ?1",
            table.select_list(),
            table.name()
        );
        let conn = self.conn()?;
        let row = conn
            .query_row(&sql, [id], |r| Row::from_sql(table, r))
            .optional()?;
        Ok(row)
    }

    /// All rows of `table`, ordered by id.
    pub fn select_all(&self, table: Table) -> DbResult<Vec<Row>> {
        let sql = format!(
            "SELECT {} FROM \"{}\" ORDER BY \"id\"",
            table.select_list(),
            table.name()
        );
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |r| Row::from_sql(table, r))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Rows whose fixed `column` equals `value`, ordered by id.
    pub fn select_where(&self, table: Table, column: &str, value: impl Into<Value>) -> DbResult<Vec<Row>> {
        let column = table.column(column).ok_or_else(|| {
            DbError::Schema(format!("table {table} has no column {column}"))
        })?;
        let sql = format!(
            "SELECT {} FROM \"{}\" WHERE \"{}\" = ?1 ORDER BY \"id\"",
            table.select_list(),
            table.name(),
            column.name
        );
        let value: Value = value.into();
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([value], |r| Row::from_sql(table, r))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Deletes the row with `id`. Returns `false` if it did not exist.
    pub fn delete(&self, table: Table, id: i64) -> DbResult<bool> {
        let sql = format!("DELETE FROM \"{}\" WHERE \"id\" = ?1", table.name());
        let changed = self.conn()?.execute(&sql, [id])?;
        debug!(table = %table, id, changed, "Deleted row");
        Ok(changed > 0)
    }

    pub fn count(&self, table: Table) -> DbResult<usize> {
        let sql = format!("SELECT COUNT(*) FROM \"{}\"", table.name());
        let count: i64 = self.conn()?.query_row(&sql, [], |r| r.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}
