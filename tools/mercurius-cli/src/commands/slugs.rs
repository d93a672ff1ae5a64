//! Slug maintenance.

use anyhow::Result;
use mercurius_store::ProductAdmin;

use super::{SlugsArgs, SlugsCommand};
use crate::context::Context;

/// Run the slugs command.
pub fn run(args: SlugsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        SlugsCommand::Backfill => backfill(ctx),
    }
}

fn backfill(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let session = ctx.admin_session(&store)?;
    let report = ProductAdmin::new(&store, &session)?.backfill_slugs()?;

    if report.updated > 0 {
        ctx.save_store(&store)?;
    }

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output.success(&format!(
        "{} products updated, {} already had a slug",
        report.updated, report.skipped
    ));
    Ok(())
}
