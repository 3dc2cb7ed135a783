//! Row values exchanged with the backend.

use rusqlite::types::Value;
use std::collections::BTreeMap;

use crate::{DbError, DbResult, Table};

/// A single table row: primary key, fixed columns by name, encoded extra bag.
///
/// Rows built by callers are checked against the table layout when they are
/// inserted or updated; rows read back always carry every fixed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    table: Table,
    id: i64,
    values: BTreeMap<&'static str, Value>,
    extra: String,
}

impl Row {
    /// Starts a row for `table` with an empty extra bag (`{}`).
    #[must_use]
    pub fn new(table: Table, id: i64) -> Self {
        Self {
            table,
            id,
            values: BTreeMap::new(),
            extra: "{}".to_string(),
        }
    }

    /// Sets a fixed column.
    #[must_use]
    pub fn set(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.values.insert(column, value.into());
        self
    }

    /// Sets the encoded extra-attribute column.
    #[must_use]
    pub fn with_extra(mut self, encoded: impl Into<String>) -> Self {
        self.extra = encoded.into();
        self
    }

    #[must_use]
    pub const fn table(&self) -> Table {
        self.table
    }

    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    #[must_use]
    pub fn extra(&self) -> &str {
        &self.extra
    }

    #[must_use]
    pub fn value(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Values in the table's column order; fails if any column is missing or
    /// unknown.
    pub(crate) fn ordered_values(&self) -> DbResult<Vec<&Value>> {
        if let Some(unknown) = self
            .values
            .keys()
            .find(|name| self.table.column(name).is_none())
        {
            return Err(DbError::Schema(format!(
                "table {} has no column {unknown}",
                self.table
            )));
        }
        self.table
            .columns()
            .iter()
            .map(|c| {
                self.values.get(c.name).ok_or_else(|| {
                    DbError::Schema(format!("row for {} is missing column {}", self.table, c.name))
                })
            })
            .collect()
    }

    /// Builds a row from a result row selected with `Table::select_list`.
    pub(crate) fn from_sql(table: Table, row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        let id: i64 = row.get(0)?;
        let mut values = BTreeMap::new();
        for (i, column) in table.columns().iter().enumerate() {
            values.insert(column.name, row.get::<_, Value>(i + 1)?);
        }
        let extra: Option<String> = row.get(table.columns().len() + 1)?;
        Ok(Self {
            table,
            id,
            values,
            extra: extra.unwrap_or_default(),
        })
    }

    fn column_error(&self, column: &str, expected: &'static str) -> DbError {
        DbError::Column {
            table: self.table.name(),
            column: column.to_string(),
            expected,
        }
    }

    pub fn get_opt_i64(&self, column: &str) -> DbResult<Option<i64>> {
        match self.values.get(column) {
            Some(Value::Integer(v)) => Ok(Some(*v)),
            Some(Value::Null) => Ok(None),
            _ => Err(self.column_error(column, "integer")),
        }
    }

    pub fn get_i64(&self, column: &str) -> DbResult<i64> {
        self.get_opt_i64(column)?
            .ok_or_else(|| self.column_error(column, "non-null integer"))
    }

    pub fn get_opt_text(&self, column: &str) -> DbResult<Option<&str>> {
        match self.values.get(column) {
            Some(Value::Text(s)) => Ok(Some(s.as_str())),
            Some(Value::Null) => Ok(None),
            _ => Err(self.column_error(column, "text")),
        }
    }

    pub fn get_text(&self, column: &str) -> DbResult<&str> {
        self.get_opt_text(column)?
            .ok_or_else(|| self.column_error(column, "non-null text"))
    }

    pub fn get_opt_bool(&self, column: &str) -> DbResult<Option<bool>> {
        match self.values.get(column) {
            Some(Value::Integer(0)) => Ok(Some(false)),
            Some(Value::Integer(1)) => Ok(Some(true)),
            Some(Value::Null) => Ok(None),
            _ => Err(self.column_error(column, "boolean")),
        }
    }

    pub fn get_bool(&self, column: &str) -> DbResult<bool> {
        self.get_opt_bool(column)?
            .ok_or_else(|| self.column_error(column, "non-null boolean"))
    }
}
