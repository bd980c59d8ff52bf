//! Error types for keel-db

use keel_core::MigrationId;
use thiserror::Error;

/// Database and ledger errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Failed to open or create the database (L001)
    #[error("[L001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Ledger table could not be created or read (L002)
    #[error("[L002] Migration ledger error: {0}")]
    LedgerError(String),

    /// Statement batch failed (L003)
    #[error("[L003] SQL execution failed: {0}")]
    ExecutionError(String),

    /// BEGIN / COMMIT / ROLLBACK failed (L004)
    #[error("[L004] Transaction failed: {0}")]
    TransactionError(String),

    /// Ledger already holds this id or source key (L005)
    #[error("[L005] Migration {id} ('{source_key}') is already recorded in the ledger")]
    DuplicateRecord {
        id: MigrationId,
        source_key: String,
    },

    /// No ledger row for this id (L006)
    #[error("[L006] No ledger record for migration {id}")]
    RecordNotFound { id: MigrationId },
}

/// Result type alias for [`DbError`].
pub type DbResult<T> = Result<T, DbError>;
