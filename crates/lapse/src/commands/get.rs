//! Get command - print a stored value.

use anyhow::{Result, bail};
use clap::Args;
use serde_json::Value;

use super::{Context, render_value};

/// Arguments for the get command.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Key to read
    pub key: String,
}

/// Run the get command.
pub async fn run(args: GetArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    let Some(value) = store.get_item::<Value>(&args.key).await? else {
        bail!("key '{}' not found", args.key);
    };

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", render_value(&value));
    }

    Ok(())
}
