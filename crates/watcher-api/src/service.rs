//! Deal collection operations: read, merge, write.
//!
//! Every mutation reads the whole collection, computes the next one in
//! memory and writes it back in a single store call. Mutations are
//! serialized by one process-wide lock, held from the read until the write
//! returns.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::Instrument;
use watcher_deals::{merge, Deal, DealError, Ingested, PartialDeal};
use watcher_observability::deal_span;
use watcher_store::{DealStore, StoreError};

/// Errors from deal collection operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller-supplied data failed validation. Nothing was written.
    #[error(transparent)]
    Invalid(#[from] DealError),

    /// The store failed to persist the collection.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Reads and mutates the deal collection held by a [`DealStore`].
pub struct DealService {
    store: Arc<dyn DealStore>,
    write_lock: Mutex<()>,
}

impl DealService {
    /// Create a service over `store`.
    pub fn new(store: Arc<dyn DealStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// List every deal. Unreadable storage lists as empty.
    pub async fn list(&self) -> Vec<Deal> {
        self.store.read_all().await
    }

    /// Merge one partial deal into the collection and persist the result.
    ///
    /// Stored data that parses but cannot be decoded is never overwritten;
    /// the ingest fails with [`ServiceError::Storage`] instead.
    pub async fn ingest(&self, partial: PartialDeal) -> Result<Ingested, ServiceError> {
        let span = deal_span("ingest");
        if let Some(asin) = partial.asin.as_deref() {
            span.record("asin", asin);
        }

        async move {
            let _guard = self.write_lock.lock().await;

            let current = self.store.read_for_merge().await?;
            let ingested = merge::ingest(partial, current)?;
            self.store.write_all(&ingested.deals).await?;

            tracing::info!(
                outcome = ingested.outcome.as_str(),
                status = %ingested.deal.effective_status(),
                count = ingested.deals.len(),
                "Deal ingested"
            );
            Ok::<_, ServiceError>(ingested)
        }
        .instrument(span)
        .await
    }

    /// Replace the whole collection with caller-supplied deals.
    ///
    /// Returns the number of deals persisted.
    pub async fn replace(&self, deals: Value) -> Result<usize, ServiceError> {
        async move {
            let deals = merge::replace_all(deals)?;

            let _guard = self.write_lock.lock().await;
            self.store.write_all(&deals).await?;

            tracing::info!(count = deals.len(), "Deals replaced");
            Ok::<_, ServiceError>(deals.len())
        }
        .instrument(deal_span("replace"))
        .await
    }

    /// Remove every deal.
    pub async fn clear(&self) -> Result<(), ServiceError> {
        async move {
            let _guard = self.write_lock.lock().await;
            self.store.clear().await?;

            tracing::info!("Deals cleared");
            Ok::<_, ServiceError>(())
        }
        .instrument(deal_span("clear"))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use watcher_deals::{DealStatus, IngestOutcome};
    use watcher_store::MemoryStore;

    fn service() -> DealService {
        DealService::new(Arc::new(MemoryStore::new()))
    }

    // === Ingest Tests ===

    #[tokio::test]
    async fn test_ingest_persists_merged_deal() {
        let service = service();

        service
            .ingest(PartialDeal::new("B001").with_title("Widget").with_price("9.99"))
            .await
            .unwrap();
        let ingested = service
            .ingest(PartialDeal::new("B001").with_code("SAVE10"))
            .await
            .unwrap();

        assert_eq!(ingested.outcome, IngestOutcome::Updated);
        assert_eq!(ingested.deal.status, Some(DealStatus::Ready));

        let stored = service.list().await;
        assert_eq!(stored, vec![ingested.deal]);
    }

    #[tokio::test]
    async fn test_ingest_without_asin_leaves_store_unchanged() {
        let store = Arc::new(MemoryStore::with_deals(vec![Deal::new("B001")]));
        let service = DealService::new(store.clone());

        let err = service.ingest(PartialDeal::default()).await.unwrap_err();

        assert!(matches!(err, ServiceError::Invalid(DealError::MissingAsin)));
        assert_eq!(store.read_all().await, vec![Deal::new("B001")]);
    }

    #[tokio::test]
    async fn test_ingest_reports_storage_failure() {
        let service = DealService::new(Arc::new(MemoryStore::new().read_only()));

        let err = service.ingest(PartialDeal::new("B001")).await.unwrap_err();

        assert!(matches!(err, ServiceError::Storage(_)));
    }

    // === Replace / Clear Tests ===

    #[tokio::test]
    async fn test_replace_returns_count() {
        let service = service();

        let count = service
            .replace(json!([{ "asin": "B001" }, { "asin": "B002" }]))
            .await
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(service.list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_replace_rejects_non_array_without_writing() {
        let store = Arc::new(MemoryStore::with_deals(vec![Deal::new("B001")]));
        let service = DealService::new(store.clone());

        let err = service.replace(json!("nope")).await.unwrap_err();

        assert!(matches!(err, ServiceError::Invalid(DealError::NotAnArray)));
        assert_eq!(store.read_all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_empties_collection() {
        let service = DealService::new(Arc::new(MemoryStore::with_deals(vec![
            Deal::new("B001"),
            Deal::new("B002"),
        ])));

        service.clear().await.unwrap();

        assert!(service.list().await.is_empty());
    }
}
