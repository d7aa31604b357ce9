use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::DEFAULT_CONTENT_TYPE;

/// A stored video and its metadata record.
///
/// Records are written once at ingestion and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Generated at creation; never supplied by the caller.
    pub id: String,
    pub title: String,
    pub description: String,
    /// MIME type declared by the upload, if any.
    pub content_type: Option<String>,
    /// Location of the bytes under the storage root.
    pub storage_path: String,
}

impl Video {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        content_type: Option<String>,
        storage_path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            content_type,
            storage_path: storage_path.into(),
        }
    }

    /// Content type to serve the bytes with. Absent or blank values fall back to
    /// `application/octet-stream`; the stored record keeps what the upload declared.
    pub fn effective_content_type(&self) -> &str {
        match self.content_type.as_deref().map(str::trim) {
            Some(ct) if !ct.is_empty() => ct,
            _ => DEFAULT_CONTENT_TYPE,
        }
    }
}
