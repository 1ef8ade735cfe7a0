//! In-memory store for tests and local experiments.

use async_trait::async_trait;
use tokio::sync::RwLock;
use watcher_deals::Deal;

use crate::{DealStore, StoreError};

/// Keeps the deal collection in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    deals: RwLock<Vec<Deal>>,
    read_only: bool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `deals`.
    pub fn with_deals(deals: Vec<Deal>) -> Self {
        Self {
            deals: RwLock::new(deals),
            read_only: false,
        }
    }

    /// Reject every write with [`StoreError::ReadOnly`].
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

#[async_trait]
impl DealStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Deal>, StoreError> {
        Ok(self.deals.read().await.clone())
    }

    async fn write_all(&self, deals: &[Deal]) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        *self.deals.write().await = deals.to_vec();
        Ok(())
    }
}
