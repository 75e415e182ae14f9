use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::favorites::DEFAULT_FAVORITES_KEY;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Listing API server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (host:port). The next free port is used when busy.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Page size for `/properties` when `limit` is not given (default: 20).
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Upper bound for `limit` (default: 100).
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

/// Where favorites are persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage file. Defaults to the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Key holding the favorites list inside the storage.
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file. Logs go to stderr when unset.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_page_size() -> usize {
    20
}

fn default_max_page_size() -> usize {
    100
}

fn default_favorites_key() -> String {
    DEFAULT_FAVORITES_KEY.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            favorites_key: default_favorites_key(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}
