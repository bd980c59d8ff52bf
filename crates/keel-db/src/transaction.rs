//! Scoped transaction guard.

use crate::error::{DbError, DbResult};
use duckdb::Connection;

/// An open `BEGIN TRANSACTION` on a borrowed connection.
///
/// Finish it with [`commit`](Self::commit) or [`rollback`](Self::rollback).
/// Dropping an unfinished guard, including while unwinding, rolls back.
pub struct Transaction<'conn> {
    conn: &'conn Connection,
    finished: bool,
}

impl<'conn> Transaction<'conn> {
    pub(crate) fn begin(conn: &'conn Connection) -> DbResult<Self> {
        conn.execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))?;
        Ok(Self {
            conn,
            finished: false,
        })
    }

    /// Connection the transaction runs on
    pub fn conn(&self) -> &Connection {
        self.conn
    }

    /// Execute a statement batch inside the transaction.
    ///
    /// A batch that is empty after trimming is a no-op.
    pub fn execute_batch(&self, sql: &str) -> DbResult<()> {
        if sql.trim().is_empty() {
            log::debug!("Skipping empty statement batch");
            return Ok(());
        }
        self.conn
            .execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    /// Commit. On failure the transaction is rolled back before returning.
    pub fn commit(mut self) -> DbResult<()> {
        self.finished = true;
        if let Err(commit_err) = self.conn.execute_batch("COMMIT") {
            if let Err(rollback_err) = self.conn.execute_batch("ROLLBACK") {
                log::warn!("Rollback after failed commit failed: {rollback_err}");
            }
            return Err(DbError::TransactionError(format!(
                "COMMIT failed: {commit_err}"
            )));
        }
        Ok(())
    }

    /// Roll back explicitly.
    pub fn rollback(mut self) -> DbResult<()> {
        self.finished = true;
        self.conn
            .execute_batch("ROLLBACK")
            .map_err(|e| DbError::TransactionError(format!("ROLLBACK failed: {e}")))
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.conn.execute_batch("ROLLBACK") {
            log::warn!("Rollback of abandoned transaction failed: {e}");
        }
    }
}
