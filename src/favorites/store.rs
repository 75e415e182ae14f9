//! Authoritative favorites state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::notify::{self, ChangeNotification, SharedRegistry, Subscription};
use super::set::FavoriteSet;
use crate::storage::{KeyValueStorage, StorageError};

/// Storage key used when none is configured.
pub const DEFAULT_FAVORITES_KEY: &str = "favorites";

/// Owns the favorites set, persists it and broadcasts every change.
///
/// Cloning is cheap and every clone shares the same state and listeners,
/// so a single store can be handed to each consumer that needs it.
#[derive(Clone)]
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStorage>,
    key: Arc<str>,
    current: Arc<Mutex<FavoriteSet>>,
    /// Bumped with `current` locked, once per broadcast change.
    revision: Arc<AtomicU64>,
    listeners: SharedRegistry,
}

impl FavoritesStore {
    /// Create a store over `storage`, seeding the in-memory set from it.
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        let key: Arc<str> = Arc::from(key.into());
        let initial = read_persisted(storage.as_ref(), &key);
        Self {
            storage,
            key,
            current: Arc::new(Mutex::new(initial)),
            revision: Arc::new(AtomicU64::new(0)),
            listeners: SharedRegistry::default(),
        }
    }

    /// Create a store using [`DEFAULT_FAVORITES_KEY`].
    pub fn with_default_key(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::new(storage, DEFAULT_FAVORITES_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the persisted set.
    ///
    /// Never fails: an absent, unreadable or unparseable value yields an
    /// empty set. Does not touch the in-memory copy.
    pub fn load(&self) -> FavoriteSet {
        read_persisted(self.storage.as_ref(), &self.key)
    }

    /// Membership test against the in-memory set.
    pub fn is_favorite(&self, id: &str) -> bool {
        self.current.lock().contains(id)
    }

    /// Snapshot of the in-memory set.
    pub fn favorites(&self) -> FavoriteSet {
        self.current.lock().clone()
    }

    /// Number of changes broadcast so far; 0 for a fresh store.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    /// Current set and revision, read together.
    pub(crate) fn snapshot(&self) -> ChangeNotification {
        let current = self.current.lock();
        ChangeNotification::new(current.clone(), self.revision())
    }

    pub fn len(&self) -> usize {
        self.current.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.lock().is_empty()
    }

    /// Flip membership of `id`, persist, and notify listeners.
    ///
    /// Returns the membership of `id` after the toggle. A persistence
    /// failure is logged; the in-memory set and the notification still
    /// reflect the toggle.
    pub fn toggle_favorite(&self, id: &str) -> bool {
        let (favorited, change) = {
            let mut current = self.current.lock();
            let favorited = current.toggle(id);
            self.persist(&current);
            (favorited, self.next_change(&current))
        };

        tracing::debug!(
            listing_id = %id,
            favorited,
            count = change.favorites().len(),
            revision = change.revision(),
            "Favorite toggled"
        );
        self.notify(&change);
        favorited
    }

    /// Remove every favorite. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let (removed, change) = {
            let mut current = self.current.lock();
            let removed = std::mem::take(&mut *current).len();
            if removed == 0 {
                return 0;
            }
            self.persist(&current);
            (removed, self.next_change(&current))
        };

        tracing::info!(count = removed, "Favorites cleared");
        self.notify(&change);
        removed
    }

    /// Adopt the persisted set if another writer changed it.
    ///
    /// Returns `true` and notifies listeners when the in-memory set was
    /// replaced. Best effort only: last writer wins.
    pub fn refresh(&self) -> bool {
        let persisted = self.load();
        let change = {
            let mut current = self.current.lock();
            if *current == persisted {
                return false;
            }
            *current = persisted;
            self.next_change(&current)
        };

        tracing::debug!(
            key = %self.key,
            count = change.favorites().len(),
            revision = change.revision(),
            "Favorites changed externally"
        );
        self.notify(&change);
        true
    }

    /// Register `listener` for every subsequent change.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ChangeNotification) + Send + Sync + 'static,
    {
        notify::register(&self.listeners, Arc::new(listener))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Write `set` through to storage. Called with the state lock held so
    /// concurrent writers persist in the order they mutated.
    fn persist(&self, set: &FavoriteSet) {
        let result = set
            .to_json()
            .map_err(StorageError::Serialize)
            .and_then(|json| self.storage.set(&self.key, &json));

        if let Err(e) = result {
            tracing::warn!(key = %self.key, error = %e, "Failed to persist favorites, keeping in-memory state");
        }
    }

    /// Stamp `set` with the next revision. Call with the state lock held.
    fn next_change(&self, set: &FavoriteSet) -> ChangeNotification {
        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        ChangeNotification::new(set.clone(), revision)
    }

    /// Must run without the state lock: listeners may call back in.
    fn notify(&self, change: &ChangeNotification) {
        notify::broadcast(&self.listeners, change);
    }
}

fn read_persisted(storage: &dyn KeyValueStorage, key: &str) -> FavoriteSet {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "No persisted favorites, starting empty");
            return FavoriteSet::new();
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read favorites, starting empty");
            return FavoriteSet::new();
        }
    };

    match FavoriteSet::from_json(&raw) {
        Ok(set) => set,
        Err(e) => {
            tracing::warn!(key, error = %e, "Persisted favorites are corrupt, starting empty");
            FavoriteSet::new()
        }
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("key", &self.key)
            .field("favorites", &*self.current.lock())
            .field("revision", &self.revision())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn empty_store() -> (Arc<MemoryStorage>, FavoritesStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = FavoritesStore::with_default_key(storage.clone());
        (storage, store)
    }

    #[test]
    fn test_initially_not_favorite() {
        let (_, store) = empty_store();
        assert!(!store.is_favorite("anything"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_toggle_scenario() {
        let (_, store) = empty_store();

        assert!(store.toggle_favorite("p1"));
        assert!(store.is_favorite("p1"));

        assert!(!store.toggle_favorite("p1"));
        assert!(!store.is_favorite("p1"));
    }

    #[test]
    fn test_toggle_persists() {
        let (storage, store) = empty_store();
        store.toggle_favorite("A");

        assert_eq!(
            storage.get(DEFAULT_FAVORITES_KEY).unwrap().as_deref(),
            Some(r#"["A"]"#)
        );
        assert!(store.load().contains("A"));
    }

    #[test]
    fn test_seeded_from_storage() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed("favs", r#"["x","y"]"#);

        let store = FavoritesStore::new(storage, "favs");
        assert_eq!(store.key(), "favs");
        assert_eq!(store.len(), 2);
        assert!(store.is_favorite("x"));
    }

    #[test]
    fn test_corrupt_storage_loads_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(DEFAULT_FAVORITES_KEY, "{not json");

        let store = FavoritesStore::with_default_key(storage);
        assert!(store.load().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_disabled_storage_degrades() {
        let store = FavoritesStore::with_default_key(Arc::new(MemoryStorage::disabled()));
        assert!(store.load().is_empty());

        assert!(store.toggle_favorite("p1"));
        assert!(store.is_favorite("p1"));
    }

    #[test]
    fn test_write_failure_keeps_memory_and_notifies() {
        let store = FavoritesStore::with_default_key(Arc::new(MemoryStorage::with_quota(4)));
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let _sub = store.subscribe(move |n| {
            assert!(n.is_favorite("too-long-for-quota"));
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(store.toggle_favorite("too-long-for-quota"));
        assert!(store.is_favorite("too-long-for-quota"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        // nothing made it to storage
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_double_toggle_notifies_twice() {
        let (_, store) = empty_store();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let _sub = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.toggle_favorite("id");
        store.toggle_favorite("id");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert!(!store.is_favorite("id"));
    }

    #[test]
    fn test_listener_can_reenter_store() {
        let (_, store) = empty_store();
        let seen = Arc::new(AtomicUsize::new(0));
        let inner = store.clone();
        let counter = seen.clone();
        let _sub = store.subscribe(move |_| {
            if inner.is_favorite("B") {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        store.toggle_favorite("B");
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clear() {
        let (storage, store) = empty_store();
        store.toggle_favorite("a");
        store.toggle_favorite("b");

        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert_eq!(
            storage.get(DEFAULT_FAVORITES_KEY).unwrap().as_deref(),
            Some("[]")
        );
        assert_eq!(store.clear(), 0);
    }

    #[test]
    fn test_refresh_adopts_external_write() {
        let (storage, store) = empty_store();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let _sub = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!store.refresh());

        storage.seed(DEFAULT_FAVORITES_KEY, r#"["from-elsewhere"]"#);
        assert!(store.refresh());
        assert!(store.is_favorite("from-elsewhere"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        assert!(!store.refresh());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let (_, store) = empty_store();
        let other = store.clone();
        store.toggle_favorite("shared");
        assert!(other.is_favorite("shared"));
    }

    #[test]
    fn test_revision_counts_broadcast_changes() {
        let (storage, store) = empty_store();
        assert_eq!(store.revision(), 0);

        store.toggle_favorite("a");
        store.toggle_favorite("a");
        assert_eq!(store.revision(), 2);

        // Nothing to clear or refresh: no change, no revision.
        assert_eq!(store.clear(), 0);
        assert!(!store.refresh());
        assert_eq!(store.revision(), 2);

        storage.seed(DEFAULT_FAVORITES_KEY, r#"["x"]"#);
        assert!(store.refresh());
        assert_eq!(store.clear(), 1);
        assert_eq!(store.revision(), 4);
    }

    #[test]
    fn test_nested_broadcast_carries_newer_revision() {
        let (_, store) = empty_store();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let inner = store.clone();
        let _toggler = store.subscribe(move |n| {
            if n.revision() == 1 {
                inner.toggle_favorite("second");
            }
        });
        let sink = seen.clone();
        let _recorder = store.subscribe(move |n| sink.lock().push(n.revision()));

        store.toggle_favorite("first");

        // Inner broadcast reaches the recorder before the outer one finishes.
        assert_eq!(*seen.lock(), vec![2, 1]);
        assert_eq!(store.snapshot().revision(), 2);
    }
}
