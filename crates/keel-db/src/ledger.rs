//! The `migrations` ledger: which migrations have been applied, and when.
//!
//! Reads take a plain connection. Writes take the runner's [`Transaction`]
//! so the ledger row and the migration's statements commit together.

use crate::error::{DbError, DbResult};
use crate::transaction::Transaction;
use chrono::NaiveDateTime;
use duckdb::Connection;
use keel_core::{AppliedRecord, MigrationId};
use std::collections::BTreeSet;

const CREATE_LEDGER: &str = "CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    filename TEXT NOT NULL UNIQUE,
    applied_at DATETIME DEFAULT CURRENT_TIMESTAMP
)";

const SELECT_RECORDS: &str =
    "SELECT id, name, filename, CAST(applied_at AS VARCHAR) FROM migrations";

/// Create the ledger table if it does not exist yet.
pub fn ensure_ledger(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_LEDGER)
        .map_err(|e| DbError::LedgerError(format!("failed to create ledger table: {e}")))
}

/// Source keys of every applied migration.
pub fn applied_keys(conn: &Connection) -> DbResult<BTreeSet<String>> {
    let mut stmt = conn
        .prepare("SELECT filename FROM migrations")
        .map_err(|e| DbError::LedgerError(format!("failed to read ledger: {e}")))?;
    let keys = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| DbError::LedgerError(format!("failed to read ledger: {e}")))?
        .collect::<Result<BTreeSet<_>, _>>()
        .map_err(|e| DbError::LedgerError(format!("ledger row error: {e}")))?;
    Ok(keys)
}

/// Every ledger row, ascending by id.
pub fn applied_records(conn: &Connection) -> DbResult<Vec<AppliedRecord>> {
    query_records(conn, &format!("{SELECT_RECORDS} ORDER BY id"))
}

/// The ledger row with the highest id, if any.
pub fn latest_record(conn: &Connection) -> DbResult<Option<AppliedRecord>> {
    Ok(query_records(conn, &format!("{SELECT_RECORDS} ORDER BY id DESC LIMIT 1"))?
        .into_iter()
        .next())
}

/// Insert the ledger row for a migration inside `tx`.
///
/// Fails with [`DbError::DuplicateRecord`] when the id or source key is
/// already recorded.
pub fn record_applied(
    tx: &Transaction<'_>,
    id: MigrationId,
    name: &str,
    source_key: &str,
) -> DbResult<()> {
    let existing: i64 = tx
        .conn()
        .query_row(
            "SELECT COUNT(*) FROM migrations WHERE id = ? OR filename = ?",
            duckdb::params![i64::from(id), source_key],
            |row| row.get(0),
        )
        .map_err(|e| DbError::LedgerError(format!("failed to read ledger: {e}")))?;
    if existing > 0 {
        return Err(DbError::DuplicateRecord {
            id,
            source_key: source_key.to_string(),
        });
    }

    tx.conn()
        .execute(
            "INSERT INTO migrations (id, name, filename) VALUES (?, ?, ?)",
            duckdb::params![i64::from(id), name, source_key],
        )
        .map_err(|e| {
            DbError::LedgerError(format!("failed to record migration {id}: {e}"))
        })?;
    Ok(())
}

/// Delete the ledger row for `id` inside `tx`.
pub fn remove_record(tx: &Transaction<'_>, id: MigrationId) -> DbResult<()> {
    let removed = tx
        .conn()
        .execute(
            "DELETE FROM migrations WHERE id = ?",
            duckdb::params![i64::from(id)],
        )
        .map_err(|e| DbError::LedgerError(format!("failed to remove migration {id}: {e}")))?;
    match removed {
        0 => Err(DbError::RecordNotFound { id }),
        1 => Ok(()),
        n => Err(DbError::LedgerError(format!(
            "removing migration {id} deleted {n} rows"
        ))),
    }
}

fn query_records(conn: &Connection, sql: &str) -> DbResult<Vec<AppliedRecord>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| DbError::LedgerError(format!("failed to read ledger: {e}")))?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })
        .map_err(|e| DbError::LedgerError(format!("failed to read ledger: {e}")))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| DbError::LedgerError(format!("ledger row error: {e}")))?;

    rows.into_iter()
        .map(|(id, name, source_key, applied_at)| {
            let id = MigrationId::try_from(id).map_err(|_| {
                DbError::LedgerError(format!("ledger id {id} is not a valid migration id"))
            })?;
            let applied_at = applied_at.ok_or_else(|| {
                DbError::LedgerError(format!("ledger record {id} has no applied_at"))
            })?;
            Ok(AppliedRecord {
                id,
                name,
                source_key,
                applied_at: parse_timestamp(&applied_at)?,
            })
        })
        .collect()
}

/// DuckDB renders `TIMESTAMP` as `YYYY-MM-DD HH:MM:SS[.ffffff]`.
fn parse_timestamp(raw: &str) -> DbResult<NaiveDateTime> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| {
            DbError::LedgerError(format!("failed to parse timestamp '{raw}': unrecognized format"))
        })
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
