//! Migration status reporting

use chrono::NaiveDateTime;
use keel_core::{AppliedRecord, MigrationId};
use serde::Serialize;

/// Whether a discovered migration is recorded in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationState {
    /// Recorded in the ledger
    Applied,
    /// Not yet recorded
    Pending,
}

impl std::fmt::Display for MigrationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MigrationState::Applied => write!(f, "applied"),
            MigrationState::Pending => write!(f, "pending"),
        }
    }
}

/// One discovered migration and its state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    pub id: MigrationId,
    pub name: String,
    pub source_key: String,
    pub state: MigrationState,
    /// Set when applied
    pub applied_at: Option<NaiveDateTime>,
    /// Whether the source has a down batch
    pub reversible: bool,
}

/// Per-migration report, ascending by id
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusReport {
    /// Every discovered migration
    pub entries: Vec<StatusEntry>,

    /// Ledger rows whose source no longer exists
    pub orphaned: Vec<AppliedRecord>,
}

impl StatusReport {
    /// Number of applied migrations among the discovered ones
    pub fn applied_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.state == MigrationState::Applied)
            .count()
    }

    /// Number of pending migrations
    pub fn pending_count(&self) -> usize {
        self.entries.len() - self.applied_count()
    }

    /// True when nothing is pending
    pub fn is_up_to_date(&self) -> bool {
        self.pending_count() == 0
    }

    /// Highest applied entry
    pub fn latest_applied(&self) -> Option<&StatusEntry> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.state == MigrationState::Applied)
    }

    /// Lowest pending entry
    pub fn next_pending(&self) -> Option<&StatusEntry> {
        self.entries
            .iter()
            .find(|e| e.state == MigrationState::Pending)
    }
}
