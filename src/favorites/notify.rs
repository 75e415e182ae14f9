//! Change notification for the favorites set.
//!
//! Listeners are held by the store's registry; a [`Subscription`] guard
//! removes its listener when dropped.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::set::FavoriteSet;

/// Broadcast after every mutation, carrying the full updated set.
///
/// Not queued: only listeners subscribed at the moment of the mutation
/// receive it. Delivery order across nested or concurrent mutations is not
/// guaranteed; a higher [`revision`](Self::revision) is always the newer set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotification {
    favorites: FavoriteSet,
    revision: u64,
}

impl ChangeNotification {
    pub(crate) fn new(favorites: FavoriteSet, revision: u64) -> Self {
        Self {
            favorites,
            revision,
        }
    }

    /// Store revision that produced this set. Assigned under the store's
    /// state lock, so it orders mutations exactly.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

}

pub(crate) type Listener = Arc<dyn Fn(&ChangeNotification) + Send + Sync>;

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

impl ListenerRegistry {
    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    fn insert(&mut self, listener: Listener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn remove(&mut self, id: u64) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    /// Clone the listener handles so they can run without the lock held.
    pub(crate) fn snapshot(&self) -> Vec<Listener> {
        self.listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect()
    }
}

pub(crate) type SharedRegistry = Arc<Mutex<ListenerRegistry>>;

pub(crate) fn register(registry: &SharedRegistry, listener: Listener) -> Subscription {
    let id = registry.lock().insert(listener);
    Subscription {
        id,
        registry: Arc::downgrade(registry),
    }
}

/// Deliver `notification` to every listener in registration order.
pub(crate) fn broadcast(registry: &SharedRegistry, notification: &ChangeNotification) {
    let listeners = registry.lock().snapshot();
    for listener in listeners {
        listener(notification);
    }
}

/// Keeps a listener registered for as long as it is alive.
#[must_use = "dropping a Subscription unsubscribes its listener"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<ListenerRegistry>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the listener now instead of at drop.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().remove(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
