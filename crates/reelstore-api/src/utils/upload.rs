//! Multipart parsing for video uploads

use axum::extract::Multipart;
use bytes::Bytes;
use reelstore_core::AppError;

/// Fields of a `POST /videos` form.
#[derive(Debug)]
pub struct VideoUpload {
    pub title: String,
    pub description: String,
    pub data: Bytes,
    /// Name the client gave the file; empty when it sent none.
    pub filename: String,
    pub content_type: Option<String>,
}

/// Extract the `file`, `title` and `description` fields from a multipart form.
///
/// Fields may arrive in any order, so the file is buffered rather than streamed. Only one
/// field named "file" is accepted; unknown fields are ignored.
pub async fn extract_video_upload(mut multipart: Multipart) -> Result<VideoUpload, AppError> {
    let mut file: Option<(Bytes, String, Option<String>)> = None;
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                if file.is_some() {
                    return Err(AppError::BadRequest(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                let filename = field.file_name().map(|s| s.to_string()).unwrap_or_default();
                let content_type = normalize_content_type(field.content_type());
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;
                file = Some((data, filename, content_type));
            }
            "title" => {
                title = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read title: {}", e))
                })?);
            }
            "description" => {
                description = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read description: {}", e))
                })?);
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    let (data, filename, content_type) =
        file.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    let title = title.ok_or_else(|| AppError::BadRequest("Missing 'title' field".to_string()))?;
    let description = description
        .ok_or_else(|| AppError::BadRequest("Missing 'description' field".to_string()))?;

    Ok(VideoUpload {
        title,
        description,
        data,
        filename,
        content_type,
    })
}

/// Blank content types count as undeclared.
fn normalize_content_type(content_type: Option<&str>) -> Option<String> {
    content_type
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .map(String::from)
}
