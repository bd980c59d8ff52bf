//! Runner - orchestrates discovery, the ledger, and transactional execution.

use crate::error::{MigrateError, MigrateResult};
use crate::status::{MigrationState, StatusEntry, StatusReport};
use keel_core::{MigrationDefinition, MigrationId, MigrationSource};
use keel_db::{ledger, Database, DbError};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Identity of a migration the runner acted on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationRef {
    pub id: MigrationId,
    pub name: String,
    pub source_key: String,
}

impl From<&MigrationDefinition> for MigrationRef {
    fn from(def: &MigrationDefinition) -> Self {
        Self {
            id: def.id,
            name: def.name.clone(),
            source_key: def.source_key.clone(),
        }
    }
}

/// Migrations applied by one [`Runner::apply_all`] call, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplySummary {
    pub applied: Vec<MigrationRef>,
}

impl ApplySummary {
    /// Number of migrations applied
    pub fn count(&self) -> usize {
        self.applied.len()
    }

    /// True when the call was a no-op
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Applies, rolls back, and reports migrations from a [`MigrationSource`]
/// against a [`Database`].
///
/// Calls are blocking and must not overlap.
pub struct Runner<'a> {
    db: &'a Database,
    source: &'a dyn MigrationSource,
}

impl<'a> Runner<'a> {
    pub fn new(db: &'a Database, source: &'a dyn MigrationSource) -> Self {
        Self { db, source }
    }

    /// Discovered migrations not yet in the ledger, ascending by id.
    pub fn pending(&self) -> MigrateResult<Vec<MigrationDefinition>> {
        ledger::ensure_ledger(self.db.conn())?;
        let applied = ledger::applied_keys(self.db.conn())?;
        Ok(self
            .source
            .discover()?
            .into_iter()
            .filter(|def| !applied.contains(&def.source_key))
            .collect())
    }

    /// Apply every pending migration in ascending id order.
    ///
    /// Each migration's up batch and ledger row commit in one transaction.
    /// The first failure rolls that transaction back and stops the run, so
    /// the ledger stays a prefix of the ordered migration sequence and a
    /// later call resumes from the failed migration.
    ///
    /// A pending source whose id is already recorded under another source
    /// key (a renamed file) fails the run before any transaction opens.
    pub fn apply_all(&self) -> MigrateResult<ApplySummary> {
        let pending = self.pending()?;
        if pending.is_empty() {
            log::debug!("No pending migrations in {}", self.source.describe());
            return Ok(ApplySummary::default());
        }

        let records = ledger::applied_records(self.db.conn())?;
        let applied_ids: HashSet<MigrationId> = records.iter().map(|r| r.id).collect();
        if let Some(def) = pending.iter().find(|def| applied_ids.contains(&def.id)) {
            // Same id under a new source key: the up batch must not run again
            return Err(MigrateError::MigrationApplyFailed {
                id: def.id,
                name: def.name.clone(),
                cause: DbError::DuplicateRecord {
                    id: def.id,
                    source_key: def.source_key.clone(),
                },
            });
        }

        if let (Some(first), Some(latest)) = (pending.first(), records.last()) {
            if first.id < latest.id {
                return Err(MigrateError::OutOfOrder {
                    id: first.id,
                    source_key: first.source_key.clone(),
                    latest: latest.id,
                });
            }
        }

        log::debug!("{} pending migration(s)", pending.len());
        let mut summary = ApplySummary::default();
        for def in &pending {
            log::debug!("Applying {}", def.source_key);
            self.db
                .transaction(|tx| {
                    tx.execute_batch(&def.up)?;
                    ledger::record_applied(tx, def.id, &def.name, &def.source_key)
                })
                .map_err(|cause| MigrateError::MigrationApplyFailed {
                    id: def.id,
                    name: def.name.clone(),
                    cause,
                })?;
            log::info!("Applied migration {} ({})", def.id, def.name);
            summary.applied.push(MigrationRef::from(def));
        }
        Ok(summary)
    }

    /// Roll back the applied migration with the highest id.
    ///
    /// Returns `None` when the ledger is empty. Fails without touching the
    /// database when that migration has no down batch.
    pub fn rollback_last(&self) -> MigrateResult<Option<MigrationRef>> {
        ledger::ensure_ledger(self.db.conn())?;
        let Some(latest) = ledger::latest_record(self.db.conn())? else {
            log::debug!("Ledger is empty; nothing to roll back");
            return Ok(None);
        };

        let def = self
            .source
            .discover()?
            .into_iter()
            .find(|def| def.id == latest.id)
            .ok_or_else(|| MigrateError::MissingDefinition {
                id: latest.id,
                source_key: latest.source_key.clone(),
            })?;
        if def.source_key != latest.source_key {
            log::warn!(
                "Migration {} was applied as '{}' but its source is now '{}'",
                def.id,
                latest.source_key,
                def.source_key
            );
        }
        if !def.is_reversible() {
            return Err(MigrateError::MissingDownScript {
                id: def.id,
                name: def.name,
            });
        }

        self.db
            .transaction(|tx| {
                tx.execute_batch(&def.down)?;
                ledger::remove_record(tx, latest.id)
            })
            .map_err(|cause| MigrateError::MigrationRollbackFailed {
                id: def.id,
                name: def.name.clone(),
                cause,
            })?;
        log::info!("Rolled back migration {} ({})", def.id, def.name);

        Ok(Some(MigrationRef {
            id: latest.id,
            name: latest.name,
            source_key: latest.source_key,
        }))
    }

    /// Applied/pending state of every discovered migration. Read-only apart
    /// from creating the ledger table when missing.
    pub fn status(&self) -> MigrateResult<StatusReport> {
        ledger::ensure_ledger(self.db.conn())?;
        let records = ledger::applied_records(self.db.conn())?;
        let definitions = self.source.discover()?;

        let by_key: HashMap<&str, _> = records
            .iter()
            .map(|r| (r.source_key.as_str(), r))
            .collect();
        let entries = definitions
            .iter()
            .map(|def| {
                let record = by_key.get(def.source_key.as_str());
                StatusEntry {
                    id: def.id,
                    name: def.name.clone(),
                    source_key: def.source_key.clone(),
                    state: if record.is_some() {
                        MigrationState::Applied
                    } else {
                        MigrationState::Pending
                    },
                    applied_at: record.map(|r| r.applied_at),
                    reversible: def.is_reversible(),
                }
            })
            .collect();

        let known: HashSet<&str> = definitions.iter().map(|d| d.source_key.as_str()).collect();
        let orphaned = records
            .iter()
            .filter(|r| !known.contains(r.source_key.as_str()))
            .cloned()
            .collect();

        Ok(StatusReport { entries, orphaned })
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
