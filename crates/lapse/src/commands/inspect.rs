//! Inspect command - show an entry with its metadata.

use anyhow::{Result, bail};
use chrono::SecondsFormat;
use clap::Args;
use console::{Style, style};

use super::Context;

/// Arguments for the inspect command.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Key to inspect
    pub key: String,
}

/// Run the inspect command.
pub async fn run(args: InspectArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    let Some(envelope) = store.get_envelope(&args.key).await? else {
        bail!("key '{}' not found", args.key);
    };

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    println!("{}", style(&args.key).bold());
    println!("{}", dim.apply_to("─".repeat(50)));
    println!(
        "{:<12} {}",
        dim.apply_to("Saved:"),
        envelope.save_time.to_rfc3339_opts(SecondsFormat::Millis, true)
    );
    match (envelope.expire_date, envelope.time_to_live()) {
        (Some(expire_date), Some(ttl)) => println!(
            "{:<12} {} ({}s left)",
            dim.apply_to("Expires:"),
            expire_date.to_rfc3339_opts(SecondsFormat::Millis, true),
            ttl.as_secs()
        ),
        _ => println!("{:<12} never", dim.apply_to("Expires:")),
    }
    println!(
        "{:<12} {}",
        dim.apply_to("Value:"),
        serde_json::to_string_pretty(&envelope.value)?
    );

    Ok(())
}
