//! Configuration system for the Lapse expiring store.
//!
//! Provides TOML-based configuration with:
//! - Store selection (`[store]`: backend kind, database path, default expiry)
//! - Logging defaults (`[logging]`)
//! - Config file layering (user config dir + project-local overrides)

pub mod discovery;
pub mod error;
pub mod types;

pub use discovery::{
    CONFIG_DIR_ENV, ConfigSource, Discovery, LoadedConfig, read_config, user_config_dir,
    write_config,
};
pub use error::{ConfigError, Result};
pub use types::*;
