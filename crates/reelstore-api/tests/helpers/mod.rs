//! Test helpers: build the application on a temporary directory and an in-memory index.
//!
//! Run with: `cargo test -p reelstore-api`. No external services are needed.

pub mod fixtures;

use axum_test::TestServer;
use reelstore_api::constants;
use reelstore_api::state::AppState;
use reelstore_core::config::VideoServiceConfig;
use reelstore_core::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// API path prefix for tests (e.g. `/api/v1`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server, state, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Directory the storage root was created in.
    pub fn temp_root(&self) -> PathBuf {
        self._temp_dir.path().to_path_buf()
    }

    pub fn storage_root(&self) -> PathBuf {
        self.temp_root().join("videos")
    }
}

/// Setup test app with an isolated storage root and database.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let storage_path = temp_dir.path().join("videos");

    let config = Config(Box::new(VideoServiceConfig::for_storage_path(
        storage_path.to_string_lossy(),
    )));

    let (state, router) = reelstore_api::setup::build_app(config)
        .await
        .expect("Failed to build application");

    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        state,
        _temp_dir: temp_dir,
    }
}
