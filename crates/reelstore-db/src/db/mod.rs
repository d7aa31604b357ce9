//! Database repositories for the data access layer
//
// Video metadata records
pub mod video;

pub use video::{VideoRepository, VideoRepositoryTrait};
