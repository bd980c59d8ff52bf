//! New command - scaffold an empty migration file

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, NewArgs};
use crate::context::ProjectContext;

/// Execute the new command
pub(crate) fn execute(args: &NewArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = ProjectContext::load(global)?;
    let name = args.name.join(" ");

    let identifier = ctx
        .scaffolder()
        .create(&name)
        .context("Failed to create migration")?;

    println!(
        "Created {}",
        ctx.config
            .migrations_dir_absolute(&ctx.root)
            .join(identifier)
            .display()
    );
    Ok(())
}
