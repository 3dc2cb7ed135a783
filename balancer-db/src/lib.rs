//! SQLite store backend for the balancer persistence core.
//!
//! Owns the physical connection and the table layout. It knows about tables,
//! columns and rows, never about entities: mapping rows to typed records is
//! the job of `balancer-storage`.
//!
//! # Layout
//!
//! One table per entity kind. Every table has an `id INTEGER PRIMARY KEY`,
//! the kind's fixed columns, and an `extra TEXT NOT NULL DEFAULT '{}'`
//! column holding the encoded extra-attribute bag.

mod database;
mod error;
mod row;
mod schema;

pub use database::{Database, DEFAULT_BUSY_TIMEOUT};
pub use error::{DbError, DbResult};
pub use row::Row;
pub use schema::{Column, ColumnType, Table};

pub use rusqlite::types::Value;
