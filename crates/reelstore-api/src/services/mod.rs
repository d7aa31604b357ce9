//! Application services
pub mod video;

pub use video::{ServedVideo, VideoService};
