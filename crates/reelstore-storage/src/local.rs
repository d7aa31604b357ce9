use crate::keys::sanitize_filename;
use crate::traits::{ByteStream, Storage, StorageError, StorageResult, UploadReader};
use async_trait::async_trait;
use futures::StreamExt;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Local filesystem storage implementation
///
/// Files are written to a hidden temporary sibling first and renamed into place once
/// fully synced, so readers never observe a torn file at a final path.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at `base_path`.
    ///
    /// Does not touch the filesystem; call [`Storage::init`] before first use.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        LocalStorage {
            base_path: base_path.into(),
        }
    }

    /// Map a stored path back to the filesystem, refusing anything outside the root.
    ///
    /// Only the part below the root is inspected, so a root such as `../data/videos`
    /// stays valid.
    fn checked_path(&self, storage_path: &str) -> StorageResult<PathBuf> {
        let path = PathBuf::from(storage_path);
        let outside = || {
            StorageError::InvalidKey(format!(
                "Storage path {} is outside the storage directory",
                storage_path
            ))
        };

        let relative = path.strip_prefix(&self.base_path).map_err(|_| outside())?;
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(outside());
        }

        Ok(path)
    }

    /// Hidden sibling for an in-flight write. Independent of the final name, which may
    /// already be at the filesystem's length limit.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(format!(".upload-{}.part", Uuid::new_v4().simple()))
    }

    async fn ensure_root(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                self.base_path.display(),
                e
            ))
        })
    }

    async fn write_then_rename(
        &self,
        mut reader: UploadReader,
        temp_path: &Path,
        path: &Path,
    ) -> StorageResult<u64> {
        let mut file = fs::File::create(temp_path).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to create file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        let bytes_copied = tokio::io::copy(&mut reader, &mut file).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to write stream to file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to sync file {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        drop(file);

        fs::rename(temp_path, path).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to move {} into place at {}: {}",
                temp_path.display(),
                path.display(),
                e
            ))
        })?;

        Ok(bytes_copied)
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn init(&self) -> StorageResult<()> {
        let existed = fs::try_exists(&self.base_path).await.unwrap_or(false);
        self.ensure_root().await?;

        if existed {
            tracing::info!(path = %self.base_path.display(), "Storage directory already present");
        } else {
            tracing::info!(path = %self.base_path.display(), "Storage directory created");
        }
        Ok(())
    }

    async fn put(
        &self,
        reader: UploadReader,
        original_name: &str,
        _content_type: Option<&str>,
    ) -> StorageResult<PathBuf> {
        let filename = sanitize_filename(original_name)?;
        let path = self.base_path.join(&filename);
        let temp_path = self.temp_path();
        let start = std::time::Instant::now();

        self.ensure_root().await?;

        let bytes_copied = match self.write_then_rename(reader, &temp_path, &path).await {
            Ok(n) => n,
            Err(e) => {
                if let Err(cleanup_err) = fs::remove_file(&temp_path).await {
                    tracing::debug!(
                        error = %cleanup_err,
                        path = %temp_path.display(),
                        "No partial upload to clean up"
                    );
                }
                return Err(e);
            }
        };

        tracing::info!(
            path = %path.display(),
            original_name = %original_name,
            size_bytes = bytes_copied,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage stream upload successful"
        );

        Ok(path)
    }

    async fn resolve(&self, storage_path: &str) -> StorageResult<ByteStream> {
        let path = self.checked_path(storage_path)?;
        let start = std::time::Instant::now();

        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(storage_path.to_string()));
            }
            Err(e) => {
                return Err(StorageError::DownloadFailed(format!(
                    "Failed to open file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(StorageError::NotFound(storage_path.to_string()));
        }

        let reader = tokio_util::io::ReaderStream::new(file);

        let path_display = path.display().to_string();
        let stream = reader.map(move |result| {
            result.map_err(|e| {
                tracing::error!(
                    path = %path_display,
                    error = %e,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Local storage stream download error"
                );
                StorageError::DownloadFailed(format!("Failed to read chunk: {}", e))
            })
        });

        tracing::debug!(
            path = %path.display(),
            size_bytes = metadata.len(),
            "Local storage stream opened"
        );

        Ok(Box::pin(stream))
    }

    async fn health_check(&self) -> StorageResult<()> {
        match fs::metadata(&self.base_path).await {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(StorageError::ConfigError(format!(
                "Storage root {} is not a directory",
                self.base_path.display()
            ))),
            Err(e) => Err(StorageError::ConfigError(format!(
                "Storage root {} is not accessible: {}",
                self.base_path.display(),
                e
            ))),
        }
    }

    fn root(&self) -> &Path {
        &self.base_path
    }
}
