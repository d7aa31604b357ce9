//! Application state shared by all handlers.

use crate::services::VideoService;
use reelstore_core::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub videos: VideoService,
}

impl AppState {
    pub fn new(config: Config, videos: VideoService) -> Self {
        Self { config, videos }
    }
}
