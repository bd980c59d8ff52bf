//! Down command - roll back the most recently applied migration

use anyhow::{Context, Result};
use keel_migrate::Runner;

use crate::cli::GlobalArgs;
use crate::context::ProjectContext;

/// Execute the down command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = ProjectContext::load(global)?;
    let db = ctx.open_database()?;
    let source = ctx.source();

    match Runner::new(&db, &source)
        .rollback_last()
        .context("Rollback failed")?
    {
        Some(migration) => println!("Rolled back: {}", migration.source_key),
        None => println!("Nothing to roll back"),
    }
    Ok(())
}
