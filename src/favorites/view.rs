//! Consumer side of the favorites store.
//!
//! A [`FavoritesView`] is what a listing card, grid or detail page holds
//! while it is mounted: the favorite status of the listings it displays,
//! kept current by the store's change notifications.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::notify::{ChangeNotification, Subscription};
use super::set::{FavoriteSet, ListingId};
use super::store::FavoritesStore;

struct Derived {
    membership: FavoriteSet,
    /// Store revision `membership` was derived from; `None` before the first.
    source: Option<u64>,
}

struct ViewState {
    ids: Vec<ListingId>,
    derived: Mutex<Derived>,
    revision: AtomicU64,
}

impl ViewState {
    /// Re-derive membership for the displayed ids from `change`, unless a
    /// newer store revision has already been applied.
    fn apply(&self, change: &ChangeNotification) {
        let mut derived = self.derived.lock();
        if derived.source.is_some_and(|seen| seen >= change.revision()) {
            tracing::trace!(
                stale = change.revision(),
                current = ?derived.source,
                "Skipping stale favorites notification"
            );
            return;
        }

        let favorites = change.favorites();
        derived.membership = self
            .ids
            .iter()
            .filter(|id| favorites.contains(id.as_str()))
            .cloned()
            .collect();
        derived.source = Some(change.revision());
        self.revision.fetch_add(1, Ordering::SeqCst);
    }
}

/// Mounted view over a fixed list of listings.
///
/// Subscribes on mount and unsubscribes on [`unmount`](Self::unmount) or
/// drop. The cached membership is only ever replaced from a broadcast set,
/// never edited locally.
pub struct FavoritesView {
    store: FavoritesStore,
    state: Arc<ViewState>,
    subscription: Option<Subscription>,
}

impl FavoritesView {
    pub fn mount<I, T>(store: &FavoritesStore, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ListingId>,
    {
        let mut ids: Vec<ListingId> = ids.into_iter().map(Into::into).collect();
        ids.sort();
        ids.dedup();

        let state = Arc::new(ViewState {
            ids,
            derived: Mutex::new(Derived {
                membership: FavoriteSet::new(),
                source: None,
            }),
            revision: AtomicU64::new(0),
        });

        // Subscribe before reading the current set so no change falls in between.
        let listener_state = state.clone();
        let subscription = store.subscribe(move |notification| {
            listener_state.apply(notification);
        });
        state.apply(&store.snapshot());

        tracing::trace!(
            listings = state.ids.len(),
            subscription = subscription.id(),
            "Favorites view mounted"
        );

        Self {
            store: store.clone(),
            state,
            subscription: Some(subscription),
        }
    }

    /// Listings this view displays, sorted and de-duplicated.
    pub fn ids(&self) -> &[ListingId] {
        &self.state.ids
    }

    /// Favorite status of a displayed listing. Listings outside the view
    /// always report `false`.
    pub fn is_favorite(&self, id: &str) -> bool {
        self.state.derived.lock().membership.contains(id)
    }

    /// Displayed listings that are currently favorited.
    pub fn favorited_ids(&self) -> Vec<ListingId> {
        self.state.derived.lock().membership.iter().cloned().collect()
    }

    /// Toggle through the store. The cached view is refreshed by the
    /// resulting notification, not by this call.
    pub fn toggle(&self, id: &str) -> bool {
        self.store.toggle_favorite(id)
    }

    /// Number of times the membership was (re)derived; 1 right after mount.
    /// Stale notifications are skipped and not counted.
    pub fn revision(&self) -> u64 {
        self.state.revision.load(Ordering::SeqCst)
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Stop receiving notifications. The last derived membership stays
    /// readable but is no longer kept current.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            tracing::trace!(subscription = subscription.id(), "Favorites view unmounted");
            subscription.unsubscribe();
        }
    }
}

impl std::fmt::Debug for FavoritesView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesView")
            .field("ids", &self.state.ids)
            .field("mounted", &self.is_mounted())
            .field("revision", &self.revision())
            .finish()
    }
}
