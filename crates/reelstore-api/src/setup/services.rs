//! Service wiring

use crate::services::VideoService;
use crate::state::AppState;
use reelstore_core::Config;
use reelstore_db::VideoRepository;
use reelstore_storage::Storage;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Assemble the application state from an open pool and an initialized store.
pub fn initialize_services(
    config: &Config,
    pool: SqlitePool,
    storage: Arc<dyn Storage>,
) -> Arc<AppState> {
    let repository = Arc::new(VideoRepository::new(pool));
    let videos = VideoService::new(storage, repository);
    Arc::new(AppState::new(config.clone(), videos))
}
