//! Keys command - list stored keys.

use anyhow::Result;
use clap::Args;

use super::Context;

/// Arguments for the keys command.
#[derive(Args, Debug)]
pub struct KeysArgs {
    /// Only list keys starting with this prefix
    #[arg(short, long)]
    pub prefix: Option<String>,
}

/// Run the keys command.
///
/// Lists keys as the backend reports them; entries that have expired but
/// were never read again still appear.
pub async fn run(args: KeysArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    let keys: Vec<String> = store
        .get_all_keys()
        .await?
        .into_iter()
        .filter(|k| args.prefix.as_deref().is_none_or(|p| k.starts_with(p)))
        .collect();

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&keys)?);
    } else {
        for key in keys {
            println!("{}", key);
        }
    }

    Ok(())
}
