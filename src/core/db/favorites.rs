use std::future::Future;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{db::storage::KeyValueStore, model::ListingId};

pub const FAVORITES_KEY: &str = "favorites";

/// Listing identifiers the user marked for later. Kept in insertion order
/// and never contains duplicates. Identifiers are not checked against the
/// listing collection, so a favorite may outlive its listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    ids: Vec<ListingId>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ListingId) -> bool {
        self.ids.contains(&id)
    }

    /// Adds `id` if absent, removes it otherwise. Returns whether `id` is a
    /// favorite afterwards.
    pub fn toggle(&mut self, id: ListingId) -> bool {
        if let Some(pos) = self.ids.iter().position(|fav| *fav == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn ids(&self) -> &[ListingId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<ListingId> for Favorites {
    fn from_iter<T: IntoIterator<Item = ListingId>>(iter: T) -> Self {
        let mut favorites = Favorites::new();
        for id in iter {
            if !favorites.contains(id) {
                favorites.ids.push(id);
            }
        }
        favorites
    }
}

pub trait FavoritesRepository {
    /// Missing favorites load as an empty set.
    fn load_favorites(&self) -> impl Future<Output = anyhow::Result<Favorites>> + Send;
    fn save_favorites(&self, favorites: &Favorites) -> impl Future<Output = anyhow::Result<()>> + Send;
}

impl<S: KeyValueStore> FavoritesRepository for S {
    async fn load_favorites(&self) -> anyhow::Result<Favorites> {
        match self.get(FAVORITES_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Malformed {FAVORITES_KEY:?} record: {raw}")),
            None => Ok(Favorites::new()),
        }
    }

    async fn save_favorites(&self, favorites: &Favorites) -> anyhow::Result<()> {
        let raw = serde_json::to_string(favorites)?;
        self.set(FAVORITES_KEY, &raw).await?;
        debug!(count = favorites.len(), "saved favorites");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_contents() {
        let mut favorites: Favorites = [ListingId(1), ListingId(3)].into_iter().collect();
        let original = favorites.clone();

        assert!(favorites.toggle(ListingId(2)));
        assert!(favorites.contains(ListingId(2)));
        assert!(!favorites.toggle(ListingId(2)));

        assert_eq!(favorites, original);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let favorites: Favorites = [ListingId(3), ListingId(1), ListingId(3)].into_iter().collect();
        assert_eq!(serde_json::to_string(&favorites).unwrap(), "[3,1]");
    }
}
