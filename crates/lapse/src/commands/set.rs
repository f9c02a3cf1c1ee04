//! Set command - store a value.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use console::Style;

use super::{Context, parse_expire, parse_value};

/// Arguments for the set command.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Key to write
    pub key: String,

    /// Value (parsed as JSON, otherwise stored as a string)
    pub value: String,

    /// Seconds until the entry expires (0 = never; default from config)
    #[arg(short, long, value_parser = parse_expire)]
    pub expire: Option<Duration>,
}

/// Run the set command.
pub async fn run(args: SetArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let value = parse_value(&args.value);
    let expire = args.expire.or_else(|| ctx.default_expire());

    store.set_item(&args.key, &value, expire).await?;

    if ctx.verbose {
        let green = Style::new().green();
        eprintln!("{} Stored {}", green.apply_to("✓"), args.key);
    }

    Ok(())
}
