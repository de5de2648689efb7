use std::{sync::Arc, time::Duration};

use roomfinder::{
    AppState, Config,
    core::{
        ListingDraft,
        db::{MemoryStore, SqliteStore},
        model::{Amenity, ListingId, Location, User},
    },
};

/// Opens a SqliteStore in a fresh temporary directory.
/// Returns both the store and the directory (which must be kept alive).
pub async fn create_test_store() -> (SqliteStore, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let store = SqliteStore::open(dir.path().join("roomfinder.db"))
        .await
        .expect("Failed to open test store");
    (store, dir)
}

/// Config with no simulated delay, for tests that do not care about timing.
pub fn test_config() -> Config {
    Config {
        fetch_delay: Duration::ZERO,
        ..Config::default()
    }
}

/// Seeded AppState over a MemoryStore. The store handle is returned too so
/// tests can inspect the write log.
pub fn memory_state() -> (AppState<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (AppState::new(store.clone(), test_config()), store)
}

pub fn admin() -> User {
    User {
        name: "admin".to_string(),
        email: "admin@example.com".to_string(),
    }
}

pub fn john() -> User {
    User {
        name: "john".to_string(),
        email: "john@example.com".to_string(),
    }
}

/// A complete add-listing draft.
pub fn make_test_draft(title: &str, rent: u64) -> ListingDraft {
    ListingDraft {
        id: None,
        title: title.to_string(),
        rent: rent.to_string(),
        deposit: (rent * 2).to_string(),
        description: "Quiet room close to the park".to_string(),
        images: vec!["/placeholder.svg?height=400&width=600".to_string()],
        location: Some(Location::NorthSide),
        amenities: vec![Amenity::WiFi, Amenity::Parking],
    }
}

pub fn ids(listings: &[&roomfinder::core::Listing]) -> Vec<ListingId> {
    listings.iter().map(|l| l.id).collect()
}
