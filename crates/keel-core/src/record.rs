//! Ledger rows.

use crate::definition::MigrationId;
use chrono::NaiveDateTime;
use serde::Serialize;

/// A row of the `migrations` ledger table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedRecord {
    /// Id of the applied migration
    pub id: MigrationId,

    /// Name recorded at apply time
    pub name: String,

    /// Identifier of the source that was applied (`filename` column)
    pub source_key: String,

    /// When the row was written
    pub applied_at: NaiveDateTime,
}
