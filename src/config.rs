//! Application configuration management.
//!
//! Settings are layered with `figment`, later sources winning:
//!
//! 1. Built-in defaults
//! 2. `config.toml` in the platform config directory
//! 3. `MEDIADEX_*` environment variables
//! 4. CLI flags (applied by the caller)

use anyhow::Result;
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::engine::DEFAULT_PROGRESS_INTERVAL;

/// Prefix of environment variables read as configuration.
pub const ENV_PREFIX: &str = "MEDIADEX_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default store root when `--db` is not given.
    #[serde(default)]
    pub store_root: Option<PathBuf>,
    /// Emit a progress event every this many files (0 disables).
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
    /// Follow symbolic links during the walk.
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Default output format.
    #[serde(default)]
    pub output: OutputFormat,
}

fn default_progress_interval() -> usize {
    DEFAULT_PROGRESS_INTERVAL
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_root: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            follow_symlinks: false,
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Load the configuration from the default platform-specific path and
    /// the environment.
    ///
    /// Falls back to defaults when the file is unreadable or invalid.
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from_path(&path),
            Err(e) => {
                log::debug!("No config directory, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load the configuration from a specific file and the environment.
    pub fn load_from_path(path: &Path) -> Self {
        match Self::figment(path).extract() {
            Ok(config) => config,
            Err(e) => {
                log::debug!(
                    "Failed to load config from {}, using defaults: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// The layered figment for a config file path.
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Render as TOML, the format [`Config::save_to_path`] writes.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save the configuration as TOML to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Get the default platform-specific configuration path.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "mediadex", "mediadex")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }
}
