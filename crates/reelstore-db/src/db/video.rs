use async_trait::async_trait;
use reelstore_core::models::Video;
use reelstore_core::AppError;
use sqlx::SqlitePool;

/// Metadata index for videos.
///
/// Implementations must tolerate concurrent readers and writers. Records are insert-only.
#[async_trait]
pub trait VideoRepositoryTrait: Send + Sync {
    /// Record a video under its id.
    async fn put(&self, video: &Video) -> Result<(), AppError>;

    /// Look up a video by id.
    async fn get(&self, id: &str) -> Result<Option<Video>, AppError>;

    /// Every known video, in insertion order.
    async fn list(&self) -> Result<Vec<Video>, AppError>;

    /// Number of known videos.
    async fn count(&self) -> Result<i64, AppError>;
}

/// SQLite-backed video repository
#[derive(Clone)]
pub struct VideoRepository {
    pool: SqlitePool,
}

impl VideoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `videos` table if it does not exist yet.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS videos (
                id TEXT PRIMARY KEY NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                content_type TEXT NULL,
                storage_path TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl VideoRepositoryTrait for VideoRepository {
    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "insert", video_id = %video.id))]
    async fn put(&self, video: &Video) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO videos (id, title, description, content_type, storage_path)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&video.id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.content_type)
        .bind(&video.storage_path)
        .execute(&self.pool)
        .await?;

        tracing::debug!(video_id = %video.id, "Video metadata recorded");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select"))]
    async fn get(&self, id: &str) -> Result<Option<Video>, AppError> {
        let video = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, title, description, content_type, storage_path
            FROM videos
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select"))]
    async fn list(&self) -> Result<Vec<Video>, AppError> {
        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, title, description, content_type, storage_path
            FROM videos
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM videos")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn repository() -> VideoRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let repo = VideoRepository::new(pool);
        repo.migrate().await.unwrap();
        repo
    }

    fn video(id: &str, content_type: Option<&str>) -> Video {
        Video::new(
            id,
            format!("title {}", id),
            "description",
            content_type.map(String::from),
            format!("videos/{}.mp4", id),
        )
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let repo = repository().await;
        let v = video("a", Some("video/mp4"));

        repo.put(&v).await.unwrap();

        assert_eq!(repo.get("a").await.unwrap(), Some(v));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = repository().await;
        assert_eq!(repo.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_absent_content_type_stored_as_null() {
        let repo = repository().await;
        repo.put(&video("a", None)).await.unwrap();

        let stored = repo.get("a").await.unwrap().unwrap();
        assert_eq!(stored.content_type, None);
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let repo = repository().await;
        for id in ["c", "a", "b"] {
            repo.put(&video(id, None)).await.unwrap();
        }

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let repo = repository().await;
        repo.put(&video("a", None)).await.unwrap();

        let result = repo.put(&video("a", None)).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let repo = repository().await;
        repo.put(&video("a", None)).await.unwrap();
        repo.migrate().await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_records_survive_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("index.db").display());

        {
            let pool = SqlitePoolOptions::new().connect(&url).await.unwrap();
            let repo = VideoRepository::new(pool.clone());
            repo.migrate().await.unwrap();
            repo.put(&video("durable", Some("video/webm"))).await.unwrap();
            pool.close().await;
        }

        let pool = SqlitePoolOptions::new().connect(&url).await.unwrap();
        let repo = VideoRepository::new(pool);
        let stored = repo.get("durable").await.unwrap().unwrap();
        assert_eq!(stored.content_type.as_deref(), Some("video/webm"));
    }
}
