//! Locating, layering and writing config files.
//!
//! Two layers are read, the second overriding the first field by field:
//! the user file `<config dir>/config.toml`, then `lapse.toml` in the
//! project directory. Command-line flags are applied by the caller.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::types::APP_NAME;
use crate::{ConfigError, LapseConfig, Result};

const USER_FILE: &str = "config.toml";
const PROJECT_FILE: &str = "lapse.toml";

/// Overrides the user config directory when set and non-empty.
pub const CONFIG_DIR_ENV: &str = "LAPSE_CONFIG_DIR";

/// One config file that discovery looked at.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// File path.
    pub path: PathBuf,
    /// `true` if the file existed and parsed.
    pub loaded: bool,
}

/// Merged configuration plus a record of how it was assembled.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Merged configuration.
    pub config: LapseConfig,
    /// Every file considered, lowest precedence first.
    pub sources: Vec<ConfigSource>,
    /// Files that existed but could not be read or parsed.
    pub warnings: Vec<String>,
    /// Where the user layer lives, whether or not it exists yet.
    pub user_file: Option<PathBuf>,
}

impl LoadedConfig {
    /// Paths of the layers that contributed to the merged config.
    pub fn loaded_from(&self) -> Vec<&Path> {
        self.sources
            .iter()
            .filter(|s| s.loaded)
            .map(|s| s.path.as_path())
            .collect()
    }
}

/// Where to look for config layers.
#[derive(Debug, Clone)]
pub struct Discovery {
    user_dir: Option<PathBuf>,
    project_dir: PathBuf,
}

impl Default for Discovery {
    fn default() -> Self {
        Self::new()
    }
}

impl Discovery {
    /// User layer from [`user_config_dir`], project layer from the working
    /// directory.
    pub fn new() -> Self {
        Self {
            user_dir: user_config_dir(),
            project_dir: PathBuf::from("."),
        }
    }

    /// Read the user layer from `dir` instead.
    pub fn with_user_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_dir = Some(dir.into());
        self
    }

    /// Read the project layer from `dir` instead.
    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = dir.into();
        self
    }

    /// Path of the user layer, if a config directory is known.
    pub fn user_file(&self) -> Option<PathBuf> {
        self.user_dir.as_ref().map(|d| d.join(USER_FILE))
    }

    /// Path of the project layer.
    pub fn project_file(&self) -> PathBuf {
        self.project_dir.join(PROJECT_FILE)
    }

    /// Read and merge every layer. Missing files are skipped; broken ones
    /// are skipped with a warning.
    pub fn load(&self) -> LoadedConfig {
        let mut config = LapseConfig::new();
        let mut warnings = Vec::new();

        let user_file = self.user_file();
        let sources = user_file
            .iter()
            .cloned()
            .chain(std::iter::once(self.project_file()))
            .map(|path| {
                let loaded = apply_layer(&mut config, &path, &mut warnings);
                ConfigSource { path, loaded }
            })
            .collect();

        LoadedConfig {
            config,
            sources,
            warnings,
            user_file,
        }
    }
}

/// Parse a single config file.
pub fn read_config(path: &Path) -> Result<LapseConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    LapseConfig::from_toml(&text)
}

/// Write `config` to `path`, creating missing parent directories.
pub fn write_config(config: &LapseConfig, path: &Path) -> Result<()> {
    let write_err = |p: &Path, source| ConfigError::WriteFile {
        path: p.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| write_err(parent, e))?;
    }
    std::fs::write(path, config.to_toml()?).map_err(|e| write_err(path, e))?;

    debug!(path = %path.display(), "Wrote config");
    Ok(())
}

/// `$LAPSE_CONFIG_DIR`, else the platform config dir plus `lapse`.
pub fn user_config_dir() -> Option<PathBuf> {
    match std::env::var(CONFIG_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::config_dir().map(|d| d.join(APP_NAME)),
    }
}

/// Merge the file at `path` into `config`; `true` if it contributed.
fn apply_layer(config: &mut LapseConfig, path: &Path, warnings: &mut Vec<String>) -> bool {
    if !path.is_file() {
        return false;
    }

    match read_config(path) {
        Ok(layer) => {
            config.merge(layer);
            true
        }
        Err(e) => {
            warnings.push(format!("Skipping {}: {}", path.display(), e));
            false
        }
    }
}
