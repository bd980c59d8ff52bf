//! In-process migration on application startup.

use crate::error::MigrateResult;
use crate::runner::{ApplySummary, Runner};
use keel_core::{Config, DirectorySource};
use keel_db::Database;
use std::path::Path;

/// Apply every pending migration from the configured migrations directory.
///
/// Intended to run on the host application's startup path before any UI is
/// shown; an error means startup should halt and surface the cause.
///
/// ```rust,no_run
/// use keel_core::Config;
/// use keel_db::Database;
/// use std::path::Path;
///
/// let root = Path::new(".");
/// let config = Config::load_from_dir(root)?;
/// let db = Database::new(&config.database_path_absolute(root))?;
/// keel_migrate::run_on_startup(&db, &config, root)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn run_on_startup(db: &Database, config: &Config, root: &Path) -> MigrateResult<ApplySummary> {
    let source = DirectorySource::new(config.migrations_dir_absolute(root), config.layout());
    let summary = Runner::new(db, &source).apply_all()?;

    if summary.is_empty() {
        log::debug!("Database schema is up to date");
    } else {
        log::info!("Applied {} migration(s) on startup", summary.count());
    }
    Ok(summary)
}
