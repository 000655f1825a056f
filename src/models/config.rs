//! Configuration model.

use crate::core::derive::DEFAULT_LANGUAGES;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog API configuration.
    pub api: ApiConfig,
    /// Dashboard configuration.
    pub catalog: CatalogConfig,
    /// Local storage configuration.
    pub storage: StorageConfig,
}

/// Catalog API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the API server.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Quiet period before a filter change is sent.
    pub debounce_ms: u64,
    /// Language shelves, in display order.
    pub languages: Vec<String>,
}

/// Local storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the watchlist and session file.
    pub data_dir: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("CINESTREAM_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            languages: DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs_data_path(),
        }
    }
}

impl ApiConfig {
    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CatalogConfig {
    /// Debounce window.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Get the configuration directory path.
pub fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cinestream")
}

/// Get the default data directory path.
fn dirs_data_path() -> PathBuf {
    if let Ok(dir) = std::env::var("CINESTREAM_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cinestream")
}

/// Load configuration from file.
pub fn load_config() -> Config {
    let config_path = dirs_config_path().join("config.toml");

    if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => return apply_env(config),
                Err(e) => tracing::warn!("Ignoring invalid {}: {}", config_path.display(), e),
            },
            Err(e) => tracing::warn!("Failed to read {}: {}", config_path.display(), e),
        }
    }

    Config::default()
}

/// Environment variables win over the config file.
fn apply_env(mut config: Config) -> Config {
    if let Ok(url) = std::env::var("CINESTREAM_API_URL") {
        config.api.base_url = url;
    }
    if let Ok(dir) = std::env::var("CINESTREAM_DATA_DIR") {
        config.storage.data_dir = PathBuf::from(dir);
    }
    config
}
