//! Video service: ingestion, lookup and serving.
//!
//! Bridges the HTTP handlers to the byte store and the metadata index. Bytes are written
//! first and the metadata record second, with no transaction spanning the two: if the
//! index write fails the file stays on disk without a record. It is not removed, because
//! filename-derived paths may be shared with another video's bytes.

use reelstore_core::models::Video;
use reelstore_core::AppError;
use reelstore_db::VideoRepositoryTrait;
use reelstore_storage::{ByteStream, Storage, StorageError, UploadReader};
use std::sync::Arc;
use uuid::Uuid;

/// A resolved video ready to be streamed to a client.
pub struct ServedVideo {
    pub video: Video,
    /// Declared content type, or `application/octet-stream` when none was declared.
    pub content_type: String,
    pub stream: ByteStream,
}

/// Operation surface for videos.
#[derive(Clone)]
pub struct VideoService {
    storage: Arc<dyn Storage>,
    repository: Arc<dyn VideoRepositoryTrait>,
}

impl VideoService {
    pub fn new(storage: Arc<dyn Storage>, repository: Arc<dyn VideoRepositoryTrait>) -> Self {
        Self {
            storage,
            repository,
        }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn repository(&self) -> &Arc<dyn VideoRepositoryTrait> {
        &self.repository
    }

    /// Store the upload and record its metadata under a freshly generated id.
    ///
    /// Every failure is reported as the same `UploadFailed` error; the cause is logged here
    /// and never returned to the caller.
    #[tracing::instrument(skip(self, description, reader), fields(video_id))]
    pub async fn create(
        &self,
        title: String,
        description: String,
        reader: UploadReader,
        original_name: &str,
        content_type: Option<String>,
    ) -> Result<Video, AppError> {
        let id = Uuid::new_v4().to_string();
        tracing::Span::current().record("video_id", id.as_str());

        let storage_path = match self
            .storage
            .put(reader, original_name, content_type.as_deref())
            .await
        {
            Ok(path) => path,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    video_id = %id,
                    original_name = %original_name,
                    "Failed to write video bytes"
                );
                return Err(AppError::upload_failed(e));
            }
        };

        let video = Video::new(
            id,
            title,
            description,
            content_type,
            storage_path.to_string_lossy(),
        );

        if let Err(e) = self.repository.put(&video).await {
            tracing::error!(
                error = %e,
                video_id = %video.id,
                storage_path = %video.storage_path,
                "Failed to record video metadata; stored file left without a record"
            );
            return Err(AppError::upload_failed(e));
        }

        tracing::info!(
            video_id = %video.id,
            storage_path = %video.storage_path,
            content_type = ?video.content_type,
            "Video created"
        );

        Ok(video)
    }

    /// Look up a video's metadata. Does not check that its bytes are still present.
    pub async fn get(&self, id: &str) -> Result<Video, AppError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))
    }

    /// All known videos, in insertion order.
    pub async fn list(&self) -> Result<Vec<Video>, AppError> {
        self.repository.list().await
    }

    /// Resolve a video to its byte stream and content type.
    ///
    /// A missing record and a missing file both surface as `NotFound`.
    #[tracing::instrument(skip(self))]
    pub async fn serve(&self, id: &str) -> Result<ServedVideo, AppError> {
        let video = self.get(id).await?;

        let stream = self
            .storage
            .resolve(&video.storage_path)
            .await
            .map_err(|e| {
                tracing::warn!(
                    error = %e,
                    video_id = %video.id,
                    storage_path = %video.storage_path,
                    "Failed to open stored video"
                );
                match e {
                    StorageError::NotFound(_) => {
                        AppError::NotFound(format!("Video {} not found", video.id))
                    }
                    other => AppError::from(other),
                }
            })?;

        let content_type = video.effective_content_type().to_string();

        Ok(ServedVideo {
            video,
            content_type,
            stream,
        })
    }
}
