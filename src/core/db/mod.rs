mod favorites;
mod hints;
mod session;
mod state;
mod storage;

use std::{path::Path, sync::Arc};

use sqlx::Row;
use state::StoreState;
use tracing::{debug, info};

pub use favorites::{FAVORITES_KEY, Favorites, FavoritesRepository};
pub use hints::{ACTIVE_TAB_KEY, EDIT_ROOM_KEY, UiHints};
pub use session::{
    CURRENT_USER_KEY, DashboardActivation, Session, SessionGate, SessionRepository,
};
pub use storage::{KeyValueStore, MemoryStore, StorageWrite};

/// Client storage persisted in a SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    state: Arc<StoreState>,
}

impl SqliteStore {
    pub async fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let state = StoreState::open(&path).await?;
        info!(path = ?path.as_ref(), "opened client storage");
        Ok(Self {
            state: Arc::new(state),
        })
    }

    pub async fn in_memory() -> anyhow::Result<Self> {
        Ok(Self {
            state: Arc::new(StoreState::in_memory().await?),
        })
    }

    pub fn location(&self) -> Option<&Path> {
        self.state.location()
    }

    /// Flush and close the underlying database. This is required before
    /// dropping the store if the file is to be copied or reopened right away.
    pub async fn close(&self) -> anyhow::Result<()> {
        self.state.close().await
    }
}

impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let mut conn = self.state.conn().await?;
        let value = sqlx::query("SELECT value FROM client_storage WHERE key = $1")
            .bind(key)
            .fetch_optional(&mut **conn)
            .await?
            .map(|row| row.try_get::<String, _>("value"))
            .transpose()?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut conn = self.state.conn().await?;
        sqlx::query(
            r#"INSERT INTO client_storage (key, value) VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value"#,
        )
        .bind(key)
        .bind(value)
        .execute(&mut **conn)
        .await?;
        debug!(key, "stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        let mut conn = self.state.conn().await?;
        sqlx::query("DELETE FROM client_storage WHERE key = $1")
            .bind(key)
            .execute(&mut **conn)
            .await?;
        debug!(key, "removed value");
        Ok(())
    }
}
