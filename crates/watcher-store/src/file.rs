//! JSON file backed store.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use watcher_deals::{decode_collection, Deal};

use crate::{DealStore, StoreError};

/// Stores the deal collection as one pretty-printed JSON array.
///
/// Writes go to a sibling temporary file that is then renamed over the data
/// file, so a reader never sees a half-written collection.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the file at `path`.
    ///
    /// Nothing is touched on disk until the first read or write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory holding the data file if it is missing.
    pub async fn ensure_ready(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| StoreError::io(dir, e)),
            _ => Ok(()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("deals.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DealStore for FileStore {
    async fn load(&self) -> Result<Vec<Deal>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let value = serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        decode_collection(value).map_err(|source| StoreError::Unrecognized {
            path: self.path.clone(),
            source,
        })
    }

    async fn write_all(&self, deals: &[Deal]) -> Result<(), StoreError> {
        self.ensure_ready().await?;

        let content = serde_json::to_vec_pretty(deals)?;
        let temp = self.temp_path();

        tokio::fs::write(&temp, &content)
            .await
            .map_err(|e| StoreError::io(&temp, e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), count = deals.len(), "Wrote deals");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watcher_deals::{Amount, DealStatus};

    fn sample_deals() -> Vec<Deal> {
        let mut ready = Deal::new("B001");
        ready.title = Some("Widget".to_string());
        ready.price = Some(Amount::from("9.99"));
        ready.code = Some("SAVE10".to_string());
        ready.last_updated = Some(1_700_000_000_000);
        ready.status = Some(DealStatus::Ready);

        let mut pending = Deal::new("B002");
        pending.discount = Some(Amount::from(5));
        pending.status = Some(DealStatus::Incomplete);

        vec![ready, pending]
    }

    // === Read Tests ===

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("deals.json"));

        assert!(store.load().await.unwrap().is_empty());
        assert!(store.read_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_distinguished_but_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deals.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = FileStore::new(&path);

        let err = store.load().await.unwrap_err();
        assert!(err.is_corrupt());
        assert!(store.read_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_non_array_file_is_unrecognized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deals.json");
        std::fs::write(&path, r#"{"deals": []}"#).unwrap();
        let store = FileStore::new(&path);

        let err = store.load().await.unwrap_err();
        assert!(err.is_unrecognized());
        assert!(store.read_all().await.is_empty());
        assert!(store.read_for_merge().await.unwrap_err().is_unrecognized());
    }

    #[tokio::test]
    async fn test_unfamiliar_field_values_load_and_write_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deals.json");
        let stored = serde_json::json!([
            { "asin": "B001", "title": "Widget", "status": "Ready" },
            { "asin": "B002", "title": "Gadget", "status": "Posted", "lastUpdated": "yesterday" }
        ]);
        std::fs::write(&path, stored.to_string()).unwrap();
        let store = FileStore::new(&path);

        let deals = store.load().await.unwrap();
        assert_eq!(deals.len(), 2);
        assert_eq!(deals[1].status, None);

        store.write_all(&deals).await.unwrap();
        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, stored);
    }

    #[tokio::test]
    async fn test_read_for_merge_treats_unparseable_file_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deals.json");
        std::fs::write(&path, "{ not json").unwrap();

        let deals = FileStore::new(&path).read_for_merge().await.unwrap();
        assert!(deals.is_empty());
    }

    // === Write Tests ===

    #[tokio::test]
    async fn test_write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("deals.json"));
        let deals = sample_deals();

        store.write_all(&deals).await.unwrap();

        assert_eq!(store.read_all().await, deals);
    }

    #[tokio::test]
    async fn test_write_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("data").join("deals.json"));

        store.write_all(&sample_deals()).await.unwrap();

        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_write_is_pretty_printed_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("deals.json"));

        store.write_all(&sample_deals()).await.unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(content.starts_with("[\n"));
        assert!(content.contains("\"lastUpdated\": 1700000000000"));
        assert!(!dir.path().join("deals.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_clear_then_read_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("deals.json"));
        store.write_all(&sample_deals()).await.unwrap();

        store.clear().await.unwrap();

        assert!(store.read_all().await.is_empty());
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_write_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deals.json");
        std::fs::write(&path, "garbage").unwrap();
        let store = FileStore::new(&path);

        store.write_all(&sample_deals()).await.unwrap();

        assert_eq!(store.load().await.unwrap().len(), 2);
    }

    // === Setup Tests ===

    #[tokio::test]
    async fn test_ensure_ready_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let store = FileStore::new(data_dir.join("deals.json"));

        store.ensure_ready().await.unwrap();

        assert!(data_dir.is_dir());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_ensure_ready_with_bare_file_name() {
        let store = FileStore::new("deals.json");

        store.ensure_ready().await.unwrap();
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let store = FileStore::new("/var/lib/watcher/deals.json");

        assert_eq!(
            store.temp_path(),
            PathBuf::from("/var/lib/watcher/deals.json.tmp")
        );
    }
}
