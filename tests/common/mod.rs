mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from roomfinder for tests
pub use roomfinder::core::db::{
    ACTIVE_TAB_KEY, CURRENT_USER_KEY, DashboardActivation, EDIT_ROOM_KEY, FAVORITES_KEY,
    Favorites, FavoritesRepository, KeyValueStore, MemoryStore, SessionGate, SessionRepository,
    SqliteStore, StorageWrite, UiHints,
};
pub use roomfinder::core::{
    AppState, Facet, ListingDraft, ListingFilter, ListingSource, SimulatedListingSource, SortOrder,
    Tab,
    model::{Amenity, ListingId, Location, User},
};
