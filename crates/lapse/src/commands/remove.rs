//! Remove command - delete a key.

use anyhow::Result;
use clap::Args;
use console::Style;

use super::Context;

/// Arguments for the remove command.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Keys to remove
    #[arg(required = true)]
    pub keys: Vec<String>,
}

/// Run the remove command.
pub async fn run(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    for key in &args.keys {
        store.remove_item(key).await?;
        if ctx.verbose {
            let green = Style::new().green();
            eprintln!("{} Removed {}", green.apply_to("✓"), key);
        }
    }

    Ok(())
}
