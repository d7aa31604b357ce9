//! Reelstore API Library
//!
//! This crate provides the video service, its HTTP handlers and application setup.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;
pub mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::video::{ServedVideo, VideoService};
pub use state::AppState;
