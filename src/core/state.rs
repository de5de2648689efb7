use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{info, warn};

use crate::{
    config::Config,
    core::{
        db::{
            Favorites, FavoritesRepository, KeyValueStore, SessionGate, SessionRepository,
            SqliteStore,
        },
        filter::{FilterContext, ListingFilter},
        forms::FormError,
        listings::{ListingCollection, ListingDraft},
        model::{Listing, ListingId, User},
        source::SimulatedListingSource,
    },
};

/// Orders favorites writes. At most one write is in flight; changes made
/// meanwhile are queued as a single snapshot and written after it, so the
/// last write always carries the latest set.
#[derive(Debug, Default)]
struct FavoritesWrites {
    in_flight: bool,
    queued: Option<Favorites>,
}

/// Application state shared by every screen: the listing collection, the
/// signed-in user, favorites, and the storage they are persisted to.
#[derive(Debug)]
pub struct AppState<S = SqliteStore> {
    store: Arc<S>,
    config: Config,
    listings: ListingCollection,
    user: Option<User>,
    favorites: Favorites,
    favorites_writes: FavoritesWrites,
    pending_delete: Option<ListingId>,
}

impl<S: KeyValueStore> AppState<S> {
    pub fn new(store: Arc<S>, config: Config) -> Self {
        Self::with_listings(store, config, ListingCollection::seeded())
    }

    pub fn with_listings(store: Arc<S>, config: Config, listings: ListingCollection) -> Self {
        Self {
            store,
            config,
            listings,
            user: None,
            favorites: Favorites::new(),
            favorites_writes: FavoritesWrites::default(),
            pending_delete: None,
        }
    }

    pub fn store(&self) -> Arc<S> {
        self.store.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn listings(&self) -> &ListingCollection {
        &self.listings
    }

    pub fn is_favorite(&self, id: ListingId) -> bool {
        self.favorites.contains(id)
    }

    pub fn is_owner(&self, listing: &Listing) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| listing.is_owned_by(&user.email))
    }

    /// Takes over the user and favorites read by a session check. While a
    /// favorites write is outstanding the in-memory set is newer than the
    /// stored one and is kept.
    pub fn apply_session(&mut self, gate: &SessionGate) {
        match gate {
            SessionGate::Allowed(session) => {
                self.user = Some(session.user.clone());
                if !self.favorites_writes.in_flight {
                    self.favorites = session.favorites.clone();
                }
            }
            SessionGate::Redirect => {
                self.user = None;
                self.favorites = Favorites::new();
            }
        }
    }

    /// Re-reads the session from storage. Returns whether a protected
    /// screen may be shown.
    pub async fn activate(&mut self) -> anyhow::Result<bool> {
        let gate = SessionGate::check(&*self.store).await?;
        self.apply_session(&gate);
        Ok(gate.session().is_some())
    }

    pub fn filtered(&self, filter: &ListingFilter) -> Vec<&Listing> {
        let ctx = FilterContext {
            user_email: self.user.as_ref().map(|u| u.email.as_str()),
            favorites: &self.favorites,
        };
        filter.apply(self.listings.as_slice(), &ctx)
    }

    /// Adds or updates a listing owned by the current user.
    pub fn save_listing(&mut self, draft: &ListingDraft) -> Result<ListingId, FormError> {
        let owner = self.user.as_ref().map(|u| u.email.as_str()).unwrap_or("");
        self.listings.save(draft, owner, OffsetDateTime::now_utc())
    }

    pub fn request_delete(&mut self, id: ListingId) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<ListingId> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Removes the listing awaiting confirmation, if any.
    pub fn confirm_delete(&mut self) -> Option<Listing> {
        let id = self.pending_delete.take()?;
        self.listings.remove(id)
    }

    /// Flips a favorite in memory. Returns whether `id` is now a favorite,
    /// and the set the caller must persist, if a write may start now. When a
    /// write is already in flight the change is queued instead and handed
    /// out by [`AppState::favorites_saved`].
    pub fn toggle_favorite_local(&mut self, id: ListingId) -> (bool, Option<Favorites>) {
        let now_favorite = self.favorites.toggle(id);
        info!(%id, favorite = now_favorite, "toggled favorite");
        let snapshot = self.favorites.clone();
        if self.favorites_writes.in_flight {
            self.favorites_writes.queued = Some(snapshot);
            return (now_favorite, None);
        }
        self.favorites_writes.in_flight = true;
        (now_favorite, Some(snapshot))
    }

    /// Reports the in-flight favorites write as finished, successful or not.
    /// Returns the queued set to write next, if any.
    pub fn favorites_saved(&mut self) -> Option<Favorites> {
        let next = self.favorites_writes.queued.take();
        self.favorites_writes.in_flight = next.is_some();
        next
    }

    /// Flips a favorite and persists the whole set. A failed write is logged
    /// and leaves the in-memory set changed.
    pub async fn toggle_favorite(&mut self, id: ListingId) -> bool {
        let (now_favorite, mut pending) = self.toggle_favorite_local(id);
        while let Some(favorites) = pending {
            if let Err(e) = self.store.save_favorites(&favorites).await {
                warn!(error = %e, "favorites were not persisted");
            }
            pending = self.favorites_saved();
        }
        now_favorite
    }

    /// Records a user whose record has already been persisted.
    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    pub async fn sign_in(&mut self, user: User) -> anyhow::Result<()> {
        self.store.save_user(&user).await?;
        self.user = Some(user);
        Ok(())
    }

    pub fn clear_user(&mut self) {
        self.user = None;
        self.favorites = Favorites::new();
    }

    pub async fn sign_out(&mut self) -> anyhow::Result<()> {
        self.store.clear_user().await?;
        self.clear_user();
        Ok(())
    }

    /// A listing source over the current collection.
    pub fn listing_source(&self) -> SimulatedListingSource {
        SimulatedListingSource::new(self.config.fetch_delay, self.listings.as_slice().to_vec())
    }
}
