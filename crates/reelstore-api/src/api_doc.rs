//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use reelstore_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reelstore API",
        version = "1.0.0",
        description = "Video upload, listing and streaming. Video endpoints are versioned under /api/v1/."
    ),
    paths(
        handlers::video_upload::upload_video,
        handlers::video_get::list_videos,
        handlers::video_get::get_video,
        handlers::video_stream::stream_video,
        handlers::health::health_check,
    ),
    components(schemas(
        models::Video,
        error::ErrorResponse,
        handlers::health::HealthResponse,
    )),
    tags(
        (name = "videos", description = "Video ingestion and retrieval"),
        (name = "health", description = "Liveness and dependency checks")
    )
)]
pub struct ApiDoc;

/// The OpenAPI document served at `constants::OPENAPI_PATH`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
