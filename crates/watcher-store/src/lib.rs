//! Flat-file persistence for the ASIN watcher deal collection.
//!
//! The whole collection is one unit: every read loads it entirely and every
//! write replaces it entirely. There is no partial or indexed update.
//!
//! # Example
//!
//! ```rust,ignore
//! use watcher_store::{DealStore, FileStore};
//!
//! let store = FileStore::new("data/deals.json");
//! store.ensure_ready().await?;
//!
//! let deals = store.read_all().await;
//! store.write_all(&deals).await?;
//! ```

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use watcher_deals::Deal;

/// Storage for the deal collection.
#[async_trait]
pub trait DealStore: Send + Sync {
    /// Load the persisted collection.
    ///
    /// Returns an empty collection when nothing has been persisted yet.
    ///
    /// # Errors
    ///
    /// Fails when the stored data cannot be read, does not parse, or holds
    /// records that cannot be decoded as deals.
    async fn load(&self) -> Result<Vec<Deal>, StoreError>;

    /// Replace the persisted collection with `deals`.
    async fn write_all(&self, deals: &[Deal]) -> Result<(), StoreError>;

    /// Load the collection, treating unreadable or corrupt data as empty.
    async fn read_all(&self) -> Vec<Deal> {
        match self.load().await {
            Ok(deals) => deals,
            Err(err) => {
                tracing::warn!(error = %err, "Stored deals unreadable; treating as empty");
                Vec::new()
            }
        }
    }

    /// Load the collection as the base of a merge.
    ///
    /// Missing, unreadable and unparseable data reads as empty, as in
    /// [`read_all`](Self::read_all).
    ///
    /// # Errors
    ///
    /// [`StoreError::Unrecognized`] when the data parses but holds records
    /// that cannot be decoded. Writing a merge over it would discard them.
    async fn read_for_merge(&self) -> Result<Vec<Deal>, StoreError> {
        match self.load().await {
            Ok(deals) => Ok(deals),
            Err(err) if err.is_unrecognized() => Err(err),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "Stored deals unreadable; merging into empty collection"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Remove every deal.
    async fn clear(&self) -> Result<(), StoreError> {
        self.write_all(&[]).await
    }
}
