//! One-shot values that carry UI state across a screen change. A hint is
//! removed from storage by the read that consumes it.

use std::future::Future;

use tracing::warn;

use crate::core::{db::storage::KeyValueStore, filter::Tab, model::ListingId};

pub const ACTIVE_TAB_KEY: &str = "activeTab";
pub const EDIT_ROOM_KEY: &str = "editRoomId";

pub trait UiHints {
    fn set_active_tab_hint(&self, tab: Tab) -> impl Future<Output = anyhow::Result<()>> + Send;
    fn take_active_tab_hint(&self) -> impl Future<Output = anyhow::Result<Option<Tab>>> + Send;
    fn set_edit_hint(&self, id: ListingId) -> impl Future<Output = anyhow::Result<()>> + Send;
    fn take_edit_hint(&self) -> impl Future<Output = anyhow::Result<Option<ListingId>>> + Send;
}

impl<S: KeyValueStore> UiHints for S {
    async fn set_active_tab_hint(&self, tab: Tab) -> anyhow::Result<()> {
        self.set(ACTIVE_TAB_KEY, tab.key()).await
    }

    async fn take_active_tab_hint(&self) -> anyhow::Result<Option<Tab>> {
        let Some(raw) = self.get(ACTIVE_TAB_KEY).await? else {
            return Ok(None);
        };
        self.remove(ACTIVE_TAB_KEY).await?;
        match raw.parse::<Tab>() {
            Ok(tab) => Ok(Some(tab)),
            Err(e) => {
                warn!(error = %e, "ignoring active tab hint");
                Ok(None)
            }
        }
    }

    async fn set_edit_hint(&self, id: ListingId) -> anyhow::Result<()> {
        self.set(EDIT_ROOM_KEY, &id.to_string()).await
    }

    async fn take_edit_hint(&self) -> anyhow::Result<Option<ListingId>> {
        let Some(raw) = self.get(EDIT_ROOM_KEY).await? else {
            return Ok(None);
        };
        self.remove(EDIT_ROOM_KEY).await?;
        match raw.parse::<ListingId>() {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                warn!(error = %e, "ignoring edit hint");
                Ok(None)
            }
        }
    }
}
