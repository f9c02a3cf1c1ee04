//! Lapse - expiring key-value storage
//!
//! Main entry point for the Lapse CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;

mod commands;

use commands::{clear, config, get, inspect, keys, merge, remove, set};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Lapse - expiring key-value storage
#[derive(Parser)]
#[command(name = "lapse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Database file (overrides the configured store path)
    #[arg(long, global = true, env = "LAPSE_DB")]
    pub db: Option<PathBuf>,

    /// Directory holding config.toml (default: platform config dir)
    #[arg(long, global = true, env = "LAPSE_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store a value, optionally expiring after a number of seconds
    Set(set::SetArgs),

    /// Merge a value into an existing entry
    Merge(merge::MergeArgs),

    /// Print a stored value
    Get(get::GetArgs),

    /// Show an entry with its save time and expiry
    Inspect(inspect::InspectArgs),

    /// Remove a key
    Remove(remove::RemoveArgs),

    /// Remove every key
    Clear(clear::ClearArgs),

    /// List all keys
    Keys(keys::KeysArgs),

    /// Show the resolved configuration, or write it with --init
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut discovery = lapse_config::Discovery::new();
    if let Some(dir) = &cli.config_dir {
        discovery = discovery.with_user_dir(dir);
    }
    let loaded = discovery.load();

    // Initialize tracing on stderr so stdout stays clean for values
    let filter = if cli.verbose {
        "lapse=debug,lapse_store=debug,lapse_config=debug,info".to_string()
    } else {
        loaded.config.log_level().to_string()
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    for warning in &loaded.warnings {
        warn!("{}", warning);
    }

    let ctx = commands::Context::new(loaded, cli.db, cli.json, cli.verbose);

    // Dispatch to command handlers
    match cli.command {
        Commands::Set(args) => set::run(args, &ctx).await,
        Commands::Merge(args) => merge::run(args, &ctx).await,
        Commands::Get(args) => get::run(args, &ctx).await,
        Commands::Inspect(args) => inspect::run(args, &ctx).await,
        Commands::Remove(args) => remove::run(args, &ctx).await,
        Commands::Clear(args) => clear::run(args, &ctx).await,
        Commands::Keys(args) => keys::run(args, &ctx).await,
        Commands::Config(args) => config::run(args, &ctx).await,
    }
}
