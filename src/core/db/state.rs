use std::{
    ops::{Deref, DerefMut},
    path::{Path, PathBuf},
};

use anyhow::Context;
use sqlx::{
    Sqlite,
    pool::PoolConnection,
    sqlite::{
        SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
    },
};
use tokio::sync::{RwLock, RwLockReadGuard};

pub(super) struct StoreState {
    location: Option<PathBuf>,
    pool: RwLock<SqlitePool>,
}

impl std::fmt::Debug for StoreState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreState")
            .field("location", &self.location)
            .finish()
    }
}

impl StoreState {
    pub(super) async fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                anyhow::bail!("Storage directory does not exist: {:?}", parent);
            }
        }

        let connect_opts = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_opts)
            .await
            .with_context(|| format!("Failed to open client storage {:?}", path))?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self {
            location: Some(path),
            pool: RwLock::new(pool),
        })
    }

    /// A single-connection in-memory database; every connection to
    /// `:memory:` would otherwise see its own empty database.
    pub(super) async fn in_memory() -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory client storage")?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self {
            location: None,
            pool: RwLock::new(pool),
        })
    }

    pub(super) fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Acquire a pooled connection and hold the pool read lock for the entire lifetime
    /// of the returned guard.
    pub(super) async fn conn(&self) -> anyhow::Result<DbConnGuard<'_>> {
        let pool_guard = self.pool.read().await;

        // The connection must be acquired while the read lock is held.
        let conn = pool_guard.acquire().await?;

        Ok(DbConnGuard {
            _pool_guard: pool_guard,
            conn,
        })
    }

    /// Waits for in-flight queries, checkpoints the WAL into the main file
    /// and closes the pool. Any later query fails.
    pub(super) async fn close(&self) -> anyhow::Result<()> {
        let pool_guard = self.pool.write().await;

        if self.location.is_some() {
            sqlx::query("PRAGMA wal_checkpoint(TRUNCATE);")
                .execute(&*pool_guard)
                .await?;
        }

        pool_guard.close().await;
        Ok(())
    }
}

pub struct DbConnGuard<'a> {
    _pool_guard: RwLockReadGuard<'a, SqlitePool>,
    conn: PoolConnection<Sqlite>,
}

impl<'a> Deref for DbConnGuard<'a> {
    type Target = PoolConnection<Sqlite>;
    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl<'a> DerefMut for DbConnGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}
