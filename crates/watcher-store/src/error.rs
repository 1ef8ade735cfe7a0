//! Store error types.

use std::path::PathBuf;

use thiserror::Error;
use watcher_deals::DealError;

/// Errors that can occur when reading or writing the deal collection.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The data file or its directory could not be accessed.
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The data file exists but does not hold a deal collection.
    #[error("Corrupt deal data in {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The data file parses but holds records that cannot be decoded as deals.
    #[error("Unrecognized deal data in {}: {source}", .path.display())]
    Unrecognized { path: PathBuf, source: DealError },

    /// The collection could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writes are disabled on this store.
    #[error("Store is read-only")]
    ReadOnly,
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error came from data that exists but does not parse.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }

    /// Whether the error came from well-formed JSON holding undecodable records.
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, StoreError::Unrecognized { .. })
    }
}
