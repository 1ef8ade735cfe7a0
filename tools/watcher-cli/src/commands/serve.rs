//! Run the HTTP API.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use watcher_api::{router, serve, AppState, DealService};
use watcher_observability::init_logging;

use super::ServeArgs;
use crate::context::Context;

/// Run the serve command.
pub async fn run(args: ServeArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(data_file) = args.data_file {
        config.storage.data_file = data_file;
    }
    if let Some(format) = args.log_format {
        config.logging.format = format;
    }

    init_logging(&config.logging).context("Failed to initialize logging")?;

    let store = ctx.store_at(&config.storage.data_file);
    store
        .ensure_ready()
        .await
        .with_context(|| {
            format!(
                "Failed to prepare data directory for {}",
                store.path().display()
            )
        })?;

    let addr = config.socket_addr()?;
    tracing::info!(
        data_file = %store.path().display(),
        log_format = %config.logging.format,
        "Starting ASIN Watcher API"
    );

    let state = AppState::new(DealService::new(Arc::new(store)));
    let app = router(state, &config.cors);

    serve(addr, app)
        .await
        .with_context(|| format!("Server on {} failed", addr))
}
