//! Configuration loading for orion-publish.
//!
//! Options are read from a TOML file (default: `config.toml` in the
//! platform config directory). Command-line flags override the file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the data directory created inside a vault.
pub const DATA_DIR_NAME: &str = ".orion-publish";

/// Name of the persisted state file inside the data directory.
pub const STATE_FILE_NAME: &str = "publish.json";

/// Options file contents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Vault directory holding the notes (default: current directory).
    #[serde(default)]
    pub vault: Option<PathBuf>,
    /// Directory for the persisted state (default: `<vault>/.orion-publish`).
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Seconds before a request to the service is abandoned (default: 30).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Log filter used when `RUST_LOG` is unset (default: `warn`).
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

// Default value functions
fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            vault: None,
            data_dir: None,
            request_timeout_secs: default_request_timeout_secs(),
            log_filter: default_log_filter(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load `explicit` if given, otherwise the default file if it exists,
    /// otherwise the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Default location of the options file.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "orion", "orion-publish")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// Resolved locations and limits for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Vault directory holding the notes.
    pub vault: PathBuf,
    /// Directory holding the persisted state.
    pub data_dir: PathBuf,
    /// Request timeout.
    pub timeout: Duration,
}

impl Workspace {
    /// Combine flags with the options file. Flags win.
    pub fn resolve(
        config: &CliConfig,
        vault: Option<PathBuf>,
        data_dir: Option<PathBuf>,
        current_dir: &Path,
    ) -> Self {
        let vault = vault
            .or_else(|| config.vault.clone())
            .unwrap_or_else(|| current_dir.to_path_buf());
        let data_dir = data_dir
            .or_else(|| config.data_dir.clone())
            .unwrap_or_else(|| vault.join(DATA_DIR_NAME));
        Self {
            vault,
            data_dir,
            timeout: config.request_timeout(),
        }
    }

    /// Path of the persisted state file.
    pub fn state_file(&self) -> PathBuf {
        self.data_dir.join(STATE_FILE_NAME)
    }
}
