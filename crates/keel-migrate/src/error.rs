//! Error types for the migration runner.

use keel_core::{CoreError, MigrationId};
use keel_db::DbError;
use thiserror::Error;

/// Migration runner errors
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Migration sources could not be discovered or parsed (R001)
    #[error("[R001] Migration discovery failed: {0}")]
    Discovery(#[from] CoreError),

    /// Ledger or connection failure outside a migration (R002)
    #[error("[R002] {0}")]
    Database(#[from] DbError),

    /// Up batch or ledger insert failed; the transaction was rolled back and
    /// later migrations were not attempted (R003)
    #[error("[R003] Migration {id} ({name}) failed to apply: {cause}")]
    MigrationApplyFailed {
        id: MigrationId,
        name: String,
        #[source]
        cause: DbError,
    },

    /// Rollback requested for a migration without a down batch (R004)
    #[error("[R004] Migration {id} ({name}) has no -- DOWN section and cannot be rolled back")]
    MissingDownScript { id: MigrationId, name: String },

    /// Down batch or ledger delete failed; the ledger record is intact (R005)
    #[error("[R005] Rollback of migration {id} ({name}) failed: {cause}")]
    MigrationRollbackFailed {
        id: MigrationId,
        name: String,
        #[source]
        cause: DbError,
    },

    /// Ledger names a migration whose source no longer exists (R006)
    #[error("[R006] Applied migration {id} ('{source_key}') has no matching source")]
    MissingDefinition {
        id: MigrationId,
        source_key: String,
    },

    /// A pending migration sorts before one already applied (R007)
    #[error("[R007] Migration {id} ('{source_key}') is older than the latest applied migration {latest}; out-of-order application is not supported")]
    OutOfOrder {
        id: MigrationId,
        source_key: String,
        latest: MigrationId,
    },
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;
