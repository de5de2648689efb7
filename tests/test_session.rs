//! Integration tests for the persisted session.
//!
//! Tests cover:
//! - Signing in and reading the user back after reopening the store
//! - Redirecting when no user, or an unreadable user, is stored
//! - Signing out
//! - Hints left for the dashboard being consumed exactly once

mod common;

use common::*;

#[tokio::test]
async fn test_sign_in_survives_reopen() -> anyhow::Result<()> {
    let (store, temp_dir) = create_test_store().await;
    store.save_user(&admin()).await?;
    store.close().await?;

    let reopened = SqliteStore::open(temp_dir.path().join("roomfinder.db")).await?;
    let user = reopened.current_user().await?;
    assert_eq!(user, Some(admin()));

    let raw = reopened.get(CURRENT_USER_KEY).await?.expect("user record");
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(value["name"], "admin");
    assert_eq!(value["email"], "admin@example.com");

    reopened.close().await?;
    Ok(())
}

#[tokio::test]
async fn test_gate_redirects_without_user() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;

    let gate = SessionGate::check(&store).await?;
    assert_eq!(gate, SessionGate::Redirect);

    Ok(())
}

#[tokio::test]
async fn test_gate_redirects_on_malformed_user() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    store.set(CURRENT_USER_KEY, "{not json").await?;

    let gate = SessionGate::check(&store).await?;
    assert_eq!(gate, SessionGate::Redirect);

    Ok(())
}

#[tokio::test]
async fn test_gate_allows_with_user_and_ignores_bad_favorites() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    store.save_user(&john()).await?;
    store.set(FAVORITES_KEY, "[1, \"two\"").await?;

    let gate = SessionGate::check(&store).await?;
    let session = gate.session().expect("signed in");
    assert_eq!(session.user, john());
    assert!(session.favorites.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_sign_out_matches_never_signed_in() -> anyhow::Result<()> {
    let (mut state, store) = memory_state();
    state.sign_in(admin()).await?;
    assert!(state.activate().await?);

    state.sign_out().await?;
    assert!(state.user().is_none());
    assert_eq!(SessionGate::check(&*store).await?, SessionGate::Redirect);
    assert!(!state.activate().await?);

    Ok(())
}

#[tokio::test]
async fn test_dashboard_hints_are_consumed_once() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    store.save_user(&admin()).await?;
    store.set_active_tab_hint(Tab::Favorites).await?;
    store.set_edit_hint(ListingId(3)).await?;

    let first = DashboardActivation::load(&store).await?;
    assert!(first.gate.session().is_some());
    assert_eq!(first.active_tab, Some(Tab::Favorites));
    assert_eq!(first.edit_listing, Some(ListingId(3)));

    let second = DashboardActivation::load(&store).await?;
    assert_eq!(second.active_tab, None);
    assert_eq!(second.edit_listing, None);
    assert_eq!(store.get(ACTIVE_TAB_KEY).await?, None);
    assert_eq!(store.get(EDIT_ROOM_KEY).await?, None);

    Ok(())
}

#[tokio::test]
async fn test_hints_survive_a_redirect() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    store.set_active_tab_hint(Tab::MyListings).await?;

    let activation = DashboardActivation::load(&store).await?;
    assert_eq!(activation.gate, SessionGate::Redirect);
    assert_eq!(activation.active_tab, None);
    assert_eq!(store.get(ACTIVE_TAB_KEY).await?, Some("my-listings".to_string()));

    Ok(())
}

#[tokio::test]
async fn test_garbage_hint_is_dropped() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    store.set(EDIT_ROOM_KEY, "").await?;

    assert_eq!(store.take_edit_hint().await?, None);
    assert_eq!(store.get(EDIT_ROOM_KEY).await?, None);

    Ok(())
}

#[tokio::test]
async fn test_gate_allows_signed_in_user_with_favorites() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;
    store.save_user(&admin()).await?;
    let favorites: Favorites = [ListingId(3)].into_iter().collect();
    store.save_favorites(&favorites).await?;

    let gate = SessionGate::check(&store).await?;
    let session = gate.session().expect("signed in");
    assert_eq!(session.user, admin());
    assert_eq!(session.favorites, favorites);

    // A screen taking over this gate sees the stored user and favorites.
    let mut state = AppState::new(std::sync::Arc::new(MemoryStore::new()), test_config());
    state.apply_session(&gate);
    assert_eq!(state.user(), Some(&admin()));
    assert!(state.is_favorite(ListingId(3)));

    Ok(())
}
