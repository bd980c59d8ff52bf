//! keel-migrate - Migration runner for keel
//!
//! Applies pending migrations in ascending id order, one transaction per
//! migration, stopping at the first failure; rolls back the most recently
//! applied migration; and reports per-migration status.

pub mod error;
pub mod runner;
pub mod startup;
pub mod status;

pub use error::{MigrateError, MigrateResult};
pub use runner::{ApplySummary, MigrationRef, Runner};
pub use startup::run_on_startup;
pub use status::{MigrationState, StatusEntry, StatusReport};
