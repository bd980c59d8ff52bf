//! Up command - apply every pending migration

use anyhow::{Context, Result};
use keel_migrate::Runner;

use crate::cli::GlobalArgs;
use crate::context::ProjectContext;

/// Execute the up command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = ProjectContext::load(global)?;
    let db = ctx.open_database()?;
    let source = ctx.source();

    let summary = Runner::new(&db, &source)
        .apply_all()
        .context("Migration run stopped")?;

    if summary.is_empty() {
        println!("Database is up to date");
        return Ok(());
    }

    for migration in &summary.applied {
        println!("  Applied: {}", migration.source_key);
    }
    println!();
    println!(
        "Applied {} migration{}",
        summary.count(),
        if summary.count() == 1 { "" } else { "s" }
    );
    Ok(())
}
