//! Shared helpers for unit tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::db::{KvStore, MemoryKvStore};
use crate::error::AppError;
use crate::repository::CatalogStore;

/// Memory store that sleeps before every read, so interleaved callers really
/// yield between loading and writing a bucket.
pub struct SlowKvStore {
    inner: MemoryKvStore,
    read_delay: Duration,
}

impl SlowKvStore {
    pub fn new(read_delay: Duration) -> Self {
        Self {
            inner: MemoryKvStore::new(),
            read_delay,
        }
    }
}

#[async_trait]
impl KvStore for SlowKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        tokio::time::sleep(self.read_delay).await;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.inner.remove(key).await
    }
}

/// Seeded store whose reads take `read_delay` each.
pub async fn slow_seeded_store(read_delay: Duration) -> CatalogStore {
    let store = CatalogStore::new(Arc::new(SlowKvStore::new(read_delay)));
    store.initialize_demo_data().await.expect("Failed to seed");
    store
}
