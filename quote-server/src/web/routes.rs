//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};

use crate::cache::{CacheClass, CacheStats};
use crate::pricing::{CostBreakdown, QuoteError, QuoteRequest};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/quote", post(quote))
        .route("/admin/cache", get(cache_stats))
        .route("/admin/cache", delete(clear_cache))
        .with_state(state)
}

/// Health check endpoint.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        rates_version: state.quoter.rates.version,
    })
}

/// Produce an itemized quote for a moving or parcel order.
async fn quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<CostBreakdown>, AppError> {
    let breakdown = state.quoter.quote(&request).await?;
    tracing::info!(
        quote_id = %breakdown.quote_id,
        order_type = ?breakdown.order_type,
        total = breakdown.total,
        "issued quote"
    );
    Ok(Json(breakdown))
}

/// Report per-class cache sizes and keys.
async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats().await)
}

/// Clear cached entries: everything, one class, or one location key.
async fn clear_cache(
    State(state): State<AppState>,
    Query(params): Query<ClearCacheParams>,
) -> Result<Json<ClearCacheResponse>, AppError> {
    let class = params
        .class
        .as_deref()
        .map(|name| {
            CacheClass::parse(name).ok_or_else(|| AppError::BadRequest {
                message: format!("unknown cache class: {name}"),
            })
        })
        .transpose()?;

    state.cache.invalidate(class, params.key.as_deref()).await;

    let cleared = match (params.class.as_deref(), params.key.as_deref()) {
        (Some(class), Some(key)) => format!("{class}:{key}"),
        (Some(class), None) => class.to_string(),
        _ => "all".to_string(),
    };
    tracing::info!(%cleared, "cache invalidated");
    Ok(Json(ClearCacheResponse { cleared }))
}

/// Application-level error response.
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<QuoteError> for AppError {
    fn from(e: QuoteError) -> Self {
        match e {
            QuoteError::InvalidInput(message) => AppError::BadRequest { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
