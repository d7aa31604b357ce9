use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_video_upload;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use reelstore_core::models::Video;
use std::io::Cursor;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/v1/videos",
    tag = "videos",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Fields: `file` (the video), `title`, `description`"),
    responses(
        (status = 200, description = "Video uploaded successfully", body = Video),
        (status = 400, description = "Malformed form or missing field", body = ErrorResponse),
        (status = 500, description = "Video not uploaded", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_video"))]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let upload = extract_video_upload(multipart).await?;

    tracing::debug!(
        filename = %upload.filename,
        content_type = ?upload.content_type,
        size_bytes = upload.data.len(),
        "Received video upload"
    );

    let video = state
        .videos
        .create(
            upload.title,
            upload.description,
            Box::pin(Cursor::new(upload.data)),
            &upload.filename,
            upload.content_type,
        )
        .await?;

    Ok(Json(video))
}
