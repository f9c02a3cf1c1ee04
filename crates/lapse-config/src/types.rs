//! Configuration types.
//!
//! # Configuration
//!
//! ```toml
//! [store]
//! backend = "sqlite"
//! path = "~/.local/share/lapse/store.db"
//! default_expire_secs = 3600
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every field is optional so layers can override one another field by
//! field.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Application name for platform directory resolution.
pub(crate) const APP_NAME: &str = "lapse";

/// Default database filename within the platform data directory.
const DEFAULT_DB_FILE: &str = "store.db";

/// Default log filter when none is configured.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LapseConfig {
    /// Store settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreConfig>,

    /// Logging settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

impl LapseConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> crate::Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge another config on top of this one (other takes priority).
    pub fn merge(&mut self, other: LapseConfig) {
        if let Some(store) = other.store {
            self.store.get_or_insert_with(StoreConfig::default).merge(store);
        }

        if let Some(logging) = other.logging {
            self.logging
                .get_or_insert_with(LoggingConfig::default)
                .merge(logging);
        }
    }

    /// Store settings, or defaults if none were configured.
    pub fn store(&self) -> StoreConfig {
        self.store.clone().unwrap_or_default()
    }

    /// Configured log level, or [`DEFAULT_LOG_LEVEL`].
    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

/// Which backend the store persists to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// SQLite database file.
    #[default]
    Sqlite,
    /// Process memory only; nothing survives exit.
    Memory,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Sqlite => write!(f, "sqlite"),
            BackendKind::Memory => write!(f, "memory"),
        }
    }
}

/// `[store]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend kind. Default: `sqlite`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendKind>,

    /// Database path for the SQLite backend. `~` expands to the home directory.
    /// Default: `<data dir>/lapse/store.db`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Expiry applied to writes that don't specify one. `0` means never.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_expire_secs: Option<u64>,
}

impl StoreConfig {
    fn merge(&mut self, other: StoreConfig) {
        if other.backend.is_some() {
            self.backend = other.backend;
        }
        if other.path.is_some() {
            self.path = other.path;
        }
        if other.default_expire_secs.is_some() {
            self.default_expire_secs = other.default_expire_secs;
        }
    }

    /// Effective backend kind.
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.unwrap_or_default()
    }

    /// Effective database path.
    ///
    /// Resolution order:
    /// 1. Configured `path` (with `~` expanded)
    /// 2. `<platform data dir>/lapse/store.db`
    /// 3. `./store.db` when no data dir is known
    pub fn effective_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => expand_home(path),
            None => dirs::data_dir()
                .map(|d| d.join(APP_NAME).join(DEFAULT_DB_FILE))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE)),
        }
    }

    /// Effective default expiry. `None` means entries never expire.
    pub fn default_expire(&self) -> Option<Duration> {
        self.default_expire_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter directive (e.g., `"info"` or `"lapse_store=debug"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl LoggingConfig {
    fn merge(&mut self, other: LoggingConfig) {
        if other.level.is_some() {
            self.level = other.level;
        }
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}
