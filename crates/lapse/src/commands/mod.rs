//! CLI command handlers.

pub mod clear;
pub mod config;
pub mod get;
pub mod inspect;
pub mod keys;
pub mod merge;
pub mod remove;
pub mod set;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result};
use lapse_config::{BackendKind, LoadedConfig};
use lapse_store::{Backend, ExpiringStore, MemoryBackend, SqliteBackend};
use serde_json::Value;
use tracing::{debug, warn};

/// Store type the commands operate on.
pub type Store = ExpiringStore<Box<dyn Backend>>;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Merged configuration and where it came from.
    pub loaded: LoadedConfig,
    /// Database path given on the command line, if any.
    pub db_override: Option<PathBuf>,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    pub fn new(
        loaded: LoadedConfig,
        db_override: Option<PathBuf>,
        json_output: bool,
        verbose: bool,
    ) -> Self {
        Self {
            loaded,
            db_override,
            json_output,
            verbose,
        }
    }

    /// Backend kind after applying `--db` (which always means SQLite).
    pub fn backend_kind(&self) -> BackendKind {
        if self.db_override.is_some() {
            BackendKind::Sqlite
        } else {
            self.loaded.config.store().backend_kind()
        }
    }

    /// Database path after applying `--db`.
    pub fn db_path(&self) -> PathBuf {
        self.db_override
            .clone()
            .unwrap_or_else(|| self.loaded.config.store().effective_path())
    }

    /// Expiry used when a write doesn't pass `--expire`.
    pub fn default_expire(&self) -> Option<Duration> {
        self.loaded.config.store().default_expire()
    }

    /// Open the configured store.
    pub fn open_store(&self) -> Result<Store> {
        let backend: Box<dyn Backend> = match self.backend_kind() {
            BackendKind::Sqlite => {
                let path = self.db_path();
                debug!(path = %path.display(), "Opening SQLite store");
                let backend = SqliteBackend::open(&path)
                    .with_context(|| format!("failed to open store at {}", path.display()))?;
                Box::new(backend)
            }
            BackendKind::Memory => {
                warn!("Memory backend selected; nothing will outlive this command");
                Box::new(MemoryBackend::new())
            }
        };
        Ok(ExpiringStore::new(backend))
    }
}

/// Parse a command-line value as JSON, falling back to a plain string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Parse an `--expire` argument given in (possibly fractional) seconds.
pub fn parse_expire(raw: &str) -> std::result::Result<Duration, String> {
    let secs: f64 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", raw))?;
    Duration::try_from_secs_f64(secs).map_err(|_| format!("'{}' is not a valid duration", raw))
}

/// Render a value for human output: strings bare, everything else as JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value(r#"{"x":1}"#), json!({"x": 1}));
        assert_eq!(parse_value("\"quoted\""), json!("quoted"));
        assert_eq!(parse_value("hello world"), json!("hello world"));
    }

    #[test]
    fn test_parse_expire() {
        assert_eq!(parse_expire("10"), Ok(Duration::from_secs(10)));
        assert_eq!(parse_expire("1.5"), Ok(Duration::from_millis(1500)));
        assert_eq!(parse_expire("0"), Ok(Duration::ZERO));
        assert!(parse_expire("-1").is_err());
        assert!(parse_expire("soon").is_err());
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!("plain")), "plain");
        assert_eq!(render_value(&json!({"x": 1})), r#"{"x":1}"#);
    }
}
