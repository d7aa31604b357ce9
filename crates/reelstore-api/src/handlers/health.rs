use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub storage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Metadata index or storage root unavailable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let count = state.videos.repository().count().await;
    let storage_ok = match state.videos.storage().health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: storage root unavailable");
            false
        }
    };

    let database = match &count {
        Ok(_) => "healthy".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: metadata index unavailable");
            "unhealthy".to_string()
        }
    };
    let storage = if storage_ok { "healthy" } else { "unhealthy" }.to_string();

    let healthy = count.is_ok() && storage_ok;
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            database,
            storage,
            videos: count.ok(),
        }),
    )
}
