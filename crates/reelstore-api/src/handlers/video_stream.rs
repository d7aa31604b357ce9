use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use reelstore_core::constants::DEFAULT_CONTENT_TYPE;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/videos/stream/{id}",
    tag = "videos",
    params(
        ("id" = String, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Raw video bytes with the declared content type", content_type = "application/octet-stream"),
        (status = 404, description = "Video or its file not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(video_id = %id, operation = "stream_video"))]
pub async fn stream_video(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let served = state.videos.serve(&id).await?;

    let content_type = HeaderValue::from_str(&served.content_type).unwrap_or_else(|_| {
        tracing::warn!(
            video_id = %id,
            content_type = %served.content_type,
            "Stored content type is not a valid header value; serving as binary"
        );
        HeaderValue::from_static(DEFAULT_CONTENT_TYPE)
    });

    let body_stream = served.stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let mut response = Response::new(Body::from_stream(body_stream));
    *response.status_mut() = StatusCode::OK;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, content_type);

    Ok(response)
}
