//! Status command - applied/pending report

use anyhow::{Context, Result};
use keel_migrate::{Runner, StatusReport};

use crate::cli::{GlobalArgs, StatusArgs};
use crate::context::ProjectContext;

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = ProjectContext::load(global)?;
    let db = ctx.open_database()?;
    let source = ctx.source();

    let report = Runner::new(&db, &source)
        .status()
        .context("Failed to read migration status")?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize to JSON")?;
        println!("{json}");
    } else {
        print_table(&report);
    }
    Ok(())
}

/// Print the report in table format
fn print_table(report: &StatusReport) {
    if report.entries.is_empty() && report.orphaned.is_empty() {
        println!("No migrations found");
        return;
    }

    let file_width = report
        .entries
        .iter()
        .map(|e| e.source_key.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let state_width = 7;

    println!("{:<file_width$}  {:<state_width$}  APPLIED_AT", "FILE", "STATE");
    println!("{:-<file_width$}  {:-<state_width$}  {}", "", "", "-".repeat(19));

    for entry in &report.entries {
        let applied_at = entry
            .applied_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<file_width$}  {:<state_width$}  {}",
            entry.source_key,
            entry.state.to_string(),
            applied_at
        );
    }

    println!();
    println!(
        "{} applied, {} pending",
        report.applied_count(),
        report.pending_count()
    );

    if !report.orphaned.is_empty() {
        println!();
        println!("Applied but missing from the migrations directory:");
        for record in &report.orphaned {
            println!("  {} (id {})", record.source_key, record.id);
        }
    }
}
