use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::types::Config;
use crate::storage::FileStorage;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

fn invalid(message: String) -> ConfigError {
    ConfigError::ValidationError { message }
}

impl Config {
    /// `idxsite/config.toml` under `dirs::config_dir()`, or under the
    /// current directory on platforms without one.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("idxsite")
            .join("config.toml")
    }

    /// Parse and validate the TOML file at `path`. A missing file is not an
    /// error and yields [`Config::default`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects an unparseable bind address, an empty favorites key,
    /// page sizes outside `1..=max_page_size` and log directives that
    /// `EnvFilter` cannot parse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let server = &self.server;

        server.bind_addr.parse::<SocketAddr>().map_err(|e| {
            invalid(format!("Invalid bind address '{}': {}", server.bind_addr, e))
        })?;

        if self.storage.favorites_key.trim().is_empty() {
            return Err(invalid("favorites_key must not be empty".to_string()));
        }

        if !(1..=server.max_page_size).contains(&server.default_page_size) {
            return Err(invalid(format!(
                "default_page_size ({}) must be between 1 and max_page_size ({})",
                server.default_page_size, server.max_page_size
            )));
        }

        EnvFilter::try_new(&self.logging.level).map_err(|e| {
            invalid(format!("Invalid log level '{}': {}", self.logging.level, e))
        })?;

        Ok(())
    }

    /// Favorites storage file: `storage.path` if set, else the platform default.
    pub fn storage_path(&self) -> PathBuf {
        self.storage
            .path
            .clone()
            .unwrap_or_else(FileStorage::default_path)
    }
}
