//! Storage abstraction trait
//!
//! This module defines the Storage trait that video byte stores must implement.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use reelstore_core::AppError;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage path: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Sequential byte stream over a stored file. Dropping it releases the file handle.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Upload payload, consumed until EOF.
pub type UploadReader = Pin<Box<dyn AsyncRead + Send + Unpin>>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(_) => AppError::NotFound("Stored file not found".to_string()),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Storage abstraction trait
///
/// The video service only talks to this trait, so the backing store can change without
/// touching ingestion or serving logic.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Make sure the storage root exists, creating it if needed.
    ///
    /// Idempotent; must succeed once before the first `put` or `resolve`.
    async fn init(&self) -> StorageResult<()>;

    /// Write the whole reader under a path derived from `original_name` and return that path.
    ///
    /// An existing file at the same path is replaced (last writer wins). The declared
    /// content type is informational; it is recorded by the caller, not by the store.
    async fn put(
        &self,
        reader: UploadReader,
        original_name: &str,
        content_type: Option<&str>,
    ) -> StorageResult<PathBuf>;

    /// Open a previously returned path for sequential reading.
    async fn resolve(&self, storage_path: &str) -> StorageResult<ByteStream>;

    /// Check that the root is present and usable.
    async fn health_check(&self) -> StorageResult<()>;

    /// Root directory all paths resolve under
    fn root(&self) -> &Path;
}
