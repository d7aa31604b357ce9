//! Shared constants.

/// Content type reported when an upload carried none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Client-facing message for every failed ingestion, whatever the underlying cause.
pub const UPLOAD_FAILED_MESSAGE: &str = "Video not uploaded";
