//! Upload fixtures

use axum_test::multipart::{MultipartForm, Part};

/// A complete upload form.
pub fn video_form(
    title: &str,
    description: &str,
    data: &[u8],
    filename: &str,
    content_type: &str,
) -> MultipartForm {
    MultipartForm::new()
        .add_text("title", title.to_string())
        .add_text("description", description.to_string())
        .add_part(
            "file",
            Part::bytes(data.to_vec())
                .file_name(filename.to_string())
                .mime_type(content_type.to_string()),
        )
}

/// An upload form whose file part comes first, as browsers built from `FormData` often send it.
pub fn video_form_file_first(title: &str, data: &[u8], filename: &str) -> MultipartForm {
    MultipartForm::new()
        .add_part(
            "file",
            Part::bytes(data.to_vec()).file_name(filename.to_string()),
        )
        .add_text("title", title.to_string())
        .add_text("description", "uploaded file first".to_string())
}

/// A few bytes that look like the start of an MP4 container.
pub fn minimal_mp4() -> Vec<u8> {
    vec![
        0x00, 0x00, 0x00, 0x18, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm', 0x00, 0x00, 0x02,
        0x00, b'i', b's', b'o', b'm', b'm', b'p', b'4', b'1',
    ]
}
