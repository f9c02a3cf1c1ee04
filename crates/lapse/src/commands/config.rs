//! Config command - show or write the resolved configuration.

use anyhow::{Result, bail};
use clap::Args;
use console::{Style, style};
use lapse_config::{LapseConfig, StoreConfig};
use serde_json::json;

use super::Context;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write the resolved settings to the user config file
    #[arg(long)]
    pub init: bool,

    /// With --init, replace an existing file
    #[arg(long, requires = "init")]
    pub force: bool,
}

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    if args.init {
        return init(args.force, ctx);
    }

    let backend = ctx.backend_kind();
    let path = ctx.db_path();
    let default_expire = ctx.default_expire().map(|d| d.as_secs());
    let log_level = ctx.loaded.config.log_level();

    if ctx.json_output {
        let sources: Vec<_> = ctx
            .loaded
            .sources
            .iter()
            .map(|s| json!({"path": s.path, "loaded": s.loaded}))
            .collect();
        let out = json!({
            "backend": backend.to_string(),
            "path": path,
            "default_expire_secs": default_expire,
            "log_level": log_level,
            "sources": sources,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    println!("{}", style("Configuration").bold());
    println!("{}", dim.apply_to("─".repeat(50)));
    println!("{:<16} {}", dim.apply_to("Backend:"), backend);
    println!("{:<16} {}", dim.apply_to("Database:"), path.display());
    match default_expire {
        Some(secs) => println!("{:<16} {}s", dim.apply_to("Default expiry:"), secs),
        None => println!("{:<16} never", dim.apply_to("Default expiry:")),
    }
    println!("{:<16} {}", dim.apply_to("Log level:"), log_level);
    println!();

    println!("{}", style("Sources").bold());
    for source in &ctx.loaded.sources {
        let marker = if source.loaded {
            Style::new().green().apply_to("✓")
        } else {
            dim.apply_to("-")
        };
        println!("{} {}", marker, source.path.display());
    }

    Ok(())
}

/// Write the effective store settings (flags applied) to the user config file.
fn init(force: bool, ctx: &Context) -> Result<()> {
    let Some(path) = ctx.loaded.user_file.as_deref() else {
        bail!("no user config directory; pass --config-dir");
    };
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let config = LapseConfig {
        store: Some(StoreConfig {
            backend: Some(ctx.backend_kind()),
            path: Some(ctx.db_path()),
            default_expire_secs: ctx.loaded.config.store().default_expire_secs,
        }),
        logging: ctx.loaded.config.logging.clone(),
    };
    lapse_config::write_config(&config, path)?;

    let green = Style::new().green();
    println!("{} Wrote {}", green.apply_to("✓"), path.display());
    Ok(())
}
