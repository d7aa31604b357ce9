use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use reelstore_core::models::Video;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/videos",
    tag = "videos",
    responses(
        (status = 200, description = "Every stored video", body = Vec<Video>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let videos = state.videos.list().await?;
    Ok(Json(videos))
}

#[utoipa::path(
    get,
    path = "/api/v1/videos/{id}",
    tag = "videos",
    params(
        ("id" = String, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video found", body = Video),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(video_id = %id, operation = "get_video"))]
pub async fn get_video(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video = state.videos.get(&id).await?;
    Ok(Json(video))
}
