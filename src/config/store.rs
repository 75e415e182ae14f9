//! Shared, reloadable configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::config::loader::ConfigError;
use crate::config::types::Config;

type Override = Box<dyn Fn(&mut Config) + Send + Sync>;

/// The active [`Config`] plus the file it came from.
///
/// Command-line overrides are recorded and re-applied after every
/// [`reload`](Self::reload), so a `--storage` or `--bind` flag keeps
/// winning over the file.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<RwLock<Config>>,
    overrides: Arc<Mutex<Vec<Override>>>,
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(config: Config, path: PathBuf) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
            overrides: Arc::new(Mutex::new(Vec::new())),
            path,
        }
    }

    /// Load `path` (defaults when the file is missing) and wrap it.
    pub fn open(path: PathBuf) -> Result<Self, ConfigError> {
        let config = Config::load_from(&path)?;
        Ok(Self::new(config, path))
    }

    /// Snapshot of the current config.
    pub fn get(&self) -> Config {
        self.inner.read().clone()
    }

    /// Re-read the file and re-apply overrides.
    ///
    /// A file that fails to load or validate leaves the current config in place.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let mut config = Config::load_from(&self.path)?;
        for apply in self.overrides.lock().iter() {
            apply(&mut config);
        }
        *self.inner.write() = config;
        tracing::info!(path = %self.path.display(), "Config reloaded");
        Ok(())
    }

    /// Apply `apply` now and after every reload. Never written to the file.
    pub fn update<F>(&self, apply: F)
    where
        F: Fn(&mut Config) + Send + Sync + 'static,
    {
        apply(&mut self.inner.write());
        self.overrides.lock().push(Box::new(apply));
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_override_survives_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbind_addr = \"127.0.0.1:4000\"\n").unwrap();

        let store = ConfigStore::open(path.clone()).unwrap();
        store.update(|config| config.storage.favorites_key = "favorites:test".to_string());

        std::fs::write(&path, "[server]\nbind_addr = \"127.0.0.1:4001\"\n").unwrap();
        store.reload().unwrap();

        let config = store.get();
        assert_eq!(config.server.bind_addr, "127.0.0.1:4001");
        assert_eq!(config.storage.favorites_key, "favorites:test");
    }
}
