//! Client-side favorites.
//!
//! [`FavoritesStore`] owns the set of favorited listings, writes it through
//! to a [`KeyValueStorage`](crate::storage::KeyValueStorage) on every change
//! and broadcasts a [`ChangeNotification`] to subscribers. Display code holds
//! a [`FavoritesView`] rather than its own copy of the set.

mod notify;
mod set;
mod store;
mod view;

pub use notify::{ChangeNotification, Subscription};
pub use set::{FavoriteSet, ListingId};
pub use store::{FavoritesStore, DEFAULT_FAVORITES_KEY};
pub use view::FavoritesView;
