//! Router assembly and the HTTP listener.

use std::net::SocketAddr;

use axum::http::request::Parts;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::CorsConfig;
use crate::routes;
use crate::AppState;

/// Build the application router.
pub fn router(state: AppState, cors: &CorsConfig) -> Router {
    routes::routes()
        .fallback(routes::not_found)
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the CORS layer from configuration.
///
/// Credentials are allowed, so origins are matched explicitly and echoed
/// back rather than answered with a wildcard.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let config = config.clone();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _request: &Parts| {
                origin
                    .to_str()
                    .map(|origin| config.allows(origin))
                    .unwrap_or(false)
            },
        ))
}

/// Bind `addr` and serve `router` until Ctrl-C.
///
/// # Errors
///
/// Fails if the address cannot be bound or the server stops with an error.
pub async fn serve(addr: SocketAddr, router: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "ASIN Watcher API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
