//! Integration tests for the simulated listing fetch.

mod common;

use std::time::Duration;

use common::*;
use roomfinder::{Config, core::source::parse_room_param};

#[tokio::test(start_paused = true)]
async fn test_fetch_resolves_after_configured_delay() -> anyhow::Result<()> {
    let store = std::sync::Arc::new(MemoryStore::new());
    let config = Config {
        fetch_delay: Duration::from_millis(1000),
        ..Config::default()
    };
    let state = AppState::new(store, config);
    let source = state.listing_source();

    let started = tokio::time::Instant::now();
    let detail = source.fetch_listing(ListingId(1)).await?.expect("listing 1");

    assert!(started.elapsed() >= Duration::from_millis(1000));
    assert_eq!(detail.listing.title, "Luxury Studio Apartment");
    assert_eq!(detail.owner.name, "admin");

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_fetch_sees_listings_added_on_dashboard() -> anyhow::Result<()> {
    let (mut state, _store) = memory_state();
    state.sign_in(john()).await?;
    let id = state.save_listing(&make_test_draft("Garden Room", 9_000))?;

    let detail = state.listing_source().fetch_listing(id).await?.expect("new listing");
    assert_eq!(detail.listing.title, "Garden Room");
    assert_eq!(detail.owner.name, "john");

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_deleted_listing_is_not_found() -> anyhow::Result<()> {
    let (mut state, _store) = memory_state();
    state.sign_in(admin()).await?;
    state.request_delete(ListingId(3));
    state.confirm_delete();

    assert!(state.listing_source().fetch_listing(ListingId(3)).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_route_param_parsing() -> anyhow::Result<()> {
    assert_eq!(parse_room_param("2"), Some(ListingId(2)));
    assert_eq!(parse_room_param(" 2 "), Some(ListingId(2)));
    assert_eq!(parse_room_param("0"), None);
    assert_eq!(parse_room_param("abc"), None);

    let source = SimulatedListingSource::new(Duration::ZERO, Vec::new());
    assert!(source.fetch_listing(ListingId(1)).await?.is_none());

    Ok(())
}
