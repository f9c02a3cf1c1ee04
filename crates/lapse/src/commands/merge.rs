//! Merge command - merge a value into an existing entry.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use console::Style;

use super::{Context, parse_expire, parse_value};

/// Arguments for the merge command.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Key to merge into
    pub key: String,

    /// Value to merge (JSON objects merge recursively, anything else replaces)
    pub value: String,

    /// Seconds until the entry expires (default: keep the current expiry, or
    /// the configured default when the key has no live entry)
    #[arg(short, long, value_parser = parse_expire)]
    pub expire: Option<Duration>,
}

/// Run the merge command.
pub async fn run(args: MergeArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let value = parse_value(&args.value);

    // A merge that creates the entry takes the configured default, like set
    let expire = match args.expire {
        Some(expire) => Some(expire),
        None => {
            let live = store.get_envelope(&args.key).await?.is_some();
            if live { None } else { ctx.default_expire() }
        }
    };

    store.merge_item(&args.key, &value, expire).await?;

    if ctx.verbose {
        let green = Style::new().green();
        eprintln!("{} Merged {}", green.apply_to("✓"), args.key);
    }

    Ok(())
}
