//! Clear command - delete every key.

use anyhow::Result;
use clap::Args;
use console::Style;

use super::Context;

/// Arguments for the clear command.
#[derive(Args, Debug)]
pub struct ClearArgs {}

/// Run the clear command.
pub async fn run(_args: ClearArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    store.clear().await?;

    if ctx.verbose {
        let green = Style::new().green();
        eprintln!("{} Store cleared", green.apply_to("✓"));
    }

    Ok(())
}
