//! Route handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::Uri;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use watcher_deals::{Deal, PartialDeal};

use crate::error::{ApiError, ApiResult};
use crate::service::ServiceError;
use crate::AppState;

/// All API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/deals",
            get(list_deals).post(replace_deals).delete(clear_deals),
        )
        .route("/api/ingest", post(ingest_deal))
}

/// `GET /api/health` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub message: String,
}

/// `GET /api/deals` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct DealsResponse {
    pub deals: Vec<Deal>,
}

/// `POST /api/ingest` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct IngestResponse {
    pub success: bool,
    pub deal: Deal,
    pub message: String,
}

/// `POST /api/deals` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReplaceResponse {
    pub success: bool,
    pub count: usize,
}

/// `DELETE /api/deals` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    pub success: bool,
    pub message: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().timestamp_millis(),
        message: "ASIN Watcher API is running".to_string(),
    })
}

async fn list_deals(State(state): State<AppState>) -> Json<DealsResponse> {
    Json(DealsResponse {
        deals: state.deals.list().await,
    })
}

async fn ingest_deal(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<IngestResponse>> {
    let Json(body) = payload?;
    let partial =
        PartialDeal::from_value(body).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let ingested = state
        .deals
        .ingest(partial)
        .await
        .map_err(|e| to_api_error(e, "Failed to ingest deal"))?;

    let message = format!("Deal {} {}", ingested.deal.asin, ingested.outcome.as_str());
    Ok(Json(IngestResponse {
        success: true,
        deal: ingested.deal,
        message,
    }))
}

async fn replace_deals(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ReplaceResponse>> {
    let Json(body) = payload?;
    let deals = match body {
        Value::Object(mut fields) => fields.remove("deals").unwrap_or(Value::Null),
        _ => Value::Null,
    };

    let count = state
        .deals
        .replace(deals)
        .await
        .map_err(|e| to_api_error(e, "Failed to update deals"))?;

    Ok(Json(ReplaceResponse {
        success: true,
        count,
    }))
}

async fn clear_deals(State(state): State<AppState>) -> ApiResult<Json<ClearResponse>> {
    state
        .deals
        .clear()
        .await
        .map_err(|e| to_api_error(e, "Failed to clear deals"))?;

    Ok(Json(ClearResponse {
        success: true,
        message: "All deals cleared".to_string(),
    }))
}

pub(crate) async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Not found: {}", uri.path()))
}

/// Validation failures go back to the caller verbatim; storage failures are
/// logged and reported with a generic message.
fn to_api_error(err: ServiceError, failure: &str) -> ApiError {
    match err {
        ServiceError::Invalid(e) => ApiError::bad_request(e.to_string()),
        ServiceError::Storage(e) => {
            tracing::error!(error = %e, "{}", failure);
            ApiError::internal(failure)
        }
    }
}
