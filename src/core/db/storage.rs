use std::{collections::HashMap, future::Future};

use tokio::sync::RwLock;

/// A write observed by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageWrite {
    Set { key: String, value: String },
    Remove { key: String },
}

/// Client-side key to string storage, the equivalent of a browser's local
/// storage. Reads and writes are independent; there are no transactions.
pub trait KeyValueStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> impl Future<Output = anyhow::Result<Option<String>>> + Send;
    fn set(&self, key: &str, value: &str) -> impl Future<Output = anyhow::Result<()>> + Send;
    fn remove(&self, key: &str) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Process-local store that also keeps a log of every write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
    writes: RwLock<Vec<StorageWrite>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn writes(&self) -> Vec<StorageWrite> {
        self.writes.read().await.clone()
    }

    /// Writes for a single key, oldest first.
    pub async fn writes_for(&self, key: &str) -> Vec<StorageWrite> {
        self.writes
            .read()
            .await
            .iter()
            .filter(|write| match write {
                StorageWrite::Set { key: k, .. } | StorageWrite::Remove { key: k } => k == key,
            })
            .cloned()
            .collect()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        self.writes.write().await.push(StorageWrite::Set {
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.values.write().await.remove(key);
        self.writes.write().await.push(StorageWrite::Remove {
            key: key.to_string(),
        });
        Ok(())
    }
}
