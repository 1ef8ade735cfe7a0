//! HTTP API for the ASIN watcher deal store.
//!
//! Routes:
//! - `GET /api/health` - Liveness check
//! - `GET /api/deals` - List the collection
//! - `POST /api/deals` - Replace the collection
//! - `DELETE /api/deals` - Clear the collection
//! - `POST /api/ingest` - Merge one partial deal
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use watcher_api::{router, serve, AppState, CorsConfig, DealService};
//! use watcher_store::FileStore;
//!
//! let store = FileStore::new("data/deals.json");
//! store.ensure_ready().await?;
//!
//! let state = AppState::new(DealService::new(Arc::new(store)));
//! let app = router(state, &CorsConfig::default());
//! serve("0.0.0.0:3001".parse()?, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod service;

pub use config::CorsConfig;
pub use error::{ApiError, ApiResult, ErrorBody};
pub use server::{cors_layer, router, serve};
pub use service::{DealService, ServiceError};

use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub deals: Arc<DealService>,
}

impl AppState {
    pub fn new(deals: DealService) -> Self {
        Self {
            deals: Arc::new(deals),
        }
    }
}
