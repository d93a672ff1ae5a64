//! Create a mercurius.toml in the working directory.

use anyhow::{bail, Result};

use super::InitArgs;
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the init command.
pub fn run(args: InitArgs, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join("mercurius.toml");
    if path.exists() && !args.force {
        bail!("{} already exists. Use --force to overwrite.", path.display());
    }

    std::fs::write(&path, generate_default_config())?;
    ctx.output.success(&format!("Wrote {}", path.display()));
    ctx.output.info("Next steps:");
    ctx.output.list_item("mercurius admin setup");
    ctx.output.list_item("mercurius product add \"Sofá Retrátil\" --price 1200 --category Sala");
    ctx.output.list_item("mercurius catalog");
    Ok(())
}
