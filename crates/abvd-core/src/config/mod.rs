//! Configuration management for abvd.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `abvd.toml` file
//! 3. User config `~/.config/abvd/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::cognate::CognateOptions;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Download configuration.
    pub download: DownloadConfig,

    /// Cognate parser options used for aggregation.
    pub cognates: CognateOptions,

    /// Storage configuration.
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./abvd.toml` (project local)
    /// 2. `~/.config/abvd/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(LOCAL_CONFIG_FILE).exists() {
            return Self::from_file(LOCAL_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE);
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("ABVD_BASE_URL") {
            self.download.base_url = url;
        }
        if let Ok(secs) = std::env::var("ABVD_TIMEOUT") {
            if let Ok(n) = secs.parse() {
                self.download.timeout_secs = n;
            }
        }
        if let Ok(n) = std::env::var("ABVD_CONCURRENCY") {
            if let Ok(n) = n.parse() {
                self.download.concurrency = n;
            }
        }
        if let Ok(dir) = std::env::var("ABVD_DATA_DIR") {
            self.storage.data_dir = dir;
        }
    }

    /// Rejects settings no run could work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.download.concurrency == 0 {
            return Err(ConfigError::Invalid(
                "download.concurrency must be at least 1".to_string(),
            ));
        }
        if !self.download.base_url.contains("{id}") {
            return Err(ConfigError::Invalid(
                "download.base_url must contain an {id} placeholder".to_string(),
            ));
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Download configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// URL template with `{db}` and `{id}` placeholders.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Requests in flight during batch downloads.
    pub concurrency: usize,

    /// Upper bound (exclusive) of language ids for batch downloads.
    pub max_language_id: u32,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            concurrency: DEFAULT_CONCURRENCY,
            max_language_id: DEFAULT_MAX_LANGUAGE_ID,
        }
    }
}

impl DownloadConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base directory for downloaded documents.
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
        }
    }
}

impl StorageConfig {
    /// Directory holding one collection's downloads.
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        PathBuf::from(&self.data_dir).join(collection)
    }
}
