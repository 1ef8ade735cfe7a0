//! Deal records and the merge engine for the ASIN watcher.
//!
//! A browser extension and a frontend each submit fragments of the same
//! product deal (title, price, discount code). This crate reconciles those
//! fragments into one canonical [`Deal`] per [`Asin`]:
//!
//! - **Model**: [`Deal`], [`PartialDeal`], [`Amount`], [`DealStatus`]
//! - **Merge**: [`merge::ingest`] folds a partial record into a collection,
//!   [`merge::replace_all`] validates a wholesale replacement
//! - **Storage format**: [`stored::decode_collection`] reads a persisted
//!   collection without dropping fields it does not recognise
//!
//! Nothing here performs I/O; persistence lives in `watcher-store`.
//!
//! # Example
//!
//! ```rust
//! use watcher_deals::prelude::*;
//!
//! let first = PartialDeal::new("B001").with_title("Widget").with_price("9.99");
//! let ingested = ingest(first, Vec::new()).unwrap();
//! assert_eq!(ingested.deal.status, Some(DealStatus::Incomplete));
//!
//! let second = PartialDeal::new("B001").with_code("SAVE10");
//! let ingested = ingest(second, ingested.deals).unwrap();
//! assert_eq!(ingested.deal.status, Some(DealStatus::Ready));
//! ```

pub mod deal;
pub mod error;
pub mod ids;
pub mod merge;
pub mod stored;

pub use deal::{Amount, Deal, DealStatus, PartialDeal};
pub use error::DealError;
pub use ids::Asin;
pub use merge::{ingest, ingest_at, placeholder_image_url, replace_all, IngestOutcome, Ingested};
pub use stored::decode_collection;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::deal::{Amount, Deal, DealStatus, PartialDeal};
    pub use crate::error::DealError;
    pub use crate::ids::Asin;
    pub use crate::merge::{ingest, ingest_at, replace_all, IngestOutcome, Ingested};
}
