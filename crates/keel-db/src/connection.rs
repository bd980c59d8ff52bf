//! Database connection wrapper.
//!
//! [`Database`] owns the DuckDB [`Connection`] to the application's single
//! database file and hands out scoped [`Transaction`]s.

use crate::error::{DbError, DbResult};
use crate::transaction::Transaction;
use duckdb::Connection;
use keel_core::config::MEMORY_DB_PATH;
use std::path::Path;

/// Wrapper around the DuckDB connection the engine migrates.
///
/// Single-threaded; one process is assumed to hold the file open for writes.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file at `path`.
    pub fn open(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self { conn })
    }

    /// Open an in-memory database.
    pub fn open_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Open from a path string, treating `:memory:` as in-memory.
    pub fn new(path: &str) -> DbResult<Self> {
        if path == MEMORY_DB_PATH {
            Self::open_memory()
        } else {
            Self::open(Path::new(path))
        }
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Start a transaction guarded by [`Transaction`].
    pub fn begin(&self) -> DbResult<Transaction<'_>> {
        Transaction::begin(&self.conn)
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
    /// error.
    pub fn transaction<F, T>(&self, body: F) -> DbResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> DbResult<T>,
    {
        let tx = self.begin()?;
        match body(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback() {
                    log::warn!("{rollback_err}");
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
