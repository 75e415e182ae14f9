//! Shared test utilities.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use idxsite::favorites::{ChangeNotification, FavoriteSet, FavoritesStore, Subscription};
use idxsite::storage::FileStorage;
use parking_lot::Mutex;
use tempfile::TempDir;

/// Create a temp dir and the path of a storage file inside it.
pub fn temp_storage_path() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("storage.json");
    (temp_dir, path)
}

/// A store persisting to `path` under the default key.
pub fn file_store(path: &PathBuf) -> FavoritesStore {
    FavoritesStore::with_default_key(Arc::new(FileStorage::new(path.clone())))
}

/// Records every notification a store delivers.
pub struct Recorder {
    received: Arc<Mutex<Vec<FavoriteSet>>>,
    _subscription: Subscription,
}

impl Recorder {
    pub fn attach(store: &FavoritesStore) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        let subscription = store.subscribe(move |n: &ChangeNotification| {
            sink.lock().push(n.favorites().clone());
        });
        Self {
            received,
            _subscription: subscription,
        }
    }

    pub fn count(&self) -> usize {
        self.received.lock().len()
    }

    pub fn last(&self) -> Option<FavoriteSet> {
        self.received.lock().last().cloned()
    }

    pub fn all(&self) -> Vec<FavoriteSet> {
        self.received.lock().clone()
    }
}

/// Sorted ids of a set, as plain strings.
pub fn ids(set: &FavoriteSet) -> Vec<String> {
    set.iter().map(|id| id.to_string()).collect()
}
