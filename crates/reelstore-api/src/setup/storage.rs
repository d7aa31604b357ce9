//! Storage setup and initialization

use anyhow::{Context, Result};
use reelstore_core::Config;
use reelstore_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Build the video store and make sure its root directory exists.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!(path = %config.video_storage_path(), "Initializing video storage...");

    let storage = LocalStorage::new(config.video_storage_path());
    storage
        .init()
        .await
        .context("Failed to initialize video storage directory")?;

    Ok(Arc::new(storage))
}
