//! Video API integration tests.
//!
//! Run with: `cargo test -p reelstore-api --test videos_test`

mod helpers;

use axum_test::multipart::MultipartForm;
use helpers::fixtures::{minimal_mp4, video_form, video_form_file_first};
use helpers::{api_path, setup_test_app};
use reelstore_core::models::Video;
use std::io::Cursor;

#[tokio::test]
async fn test_upload_then_stream() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post(&api_path("/videos"))
        .multipart(video_form("intro", "first video", b"ABC", "a.mp4", "video/mp4"))
        .await;

    assert_eq!(response.status_code(), 200);
    let video: Video = response.json();
    assert!(!video.id.is_empty());
    assert_eq!(video.title, "intro");
    assert_eq!(video.description, "first video");
    assert_eq!(video.content_type.as_deref(), Some("video/mp4"));

    let stream = client
        .get(&api_path(&format!("/videos/stream/{}", video.id)))
        .await;

    assert_eq!(stream.status_code(), 200);
    assert_eq!(stream.header("content-type"), "video/mp4");
    assert_eq!(stream.as_bytes().as_ref(), b"ABC");
}

#[tokio::test]
async fn test_upload_response_has_no_raw_bytes() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/videos"))
        .multipart(video_form("t", "d", &minimal_mp4(), "clip.mp4", "video/mp4"))
        .await;

    let body: serde_json::Value = response.json();
    let mut keys: Vec<&str> = body
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["contentType", "description", "id", "storagePath", "title"]
    );
}

#[tokio::test]
async fn test_file_field_before_text_fields() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post(&api_path("/videos"))
        .multipart(video_form_file_first("first", b"payload", "first.mp4"))
        .await;

    assert_eq!(response.status_code(), 200);
    let video: Video = response.json();
    assert_eq!(video.title, "first");

    let stream = client
        .get(&api_path(&format!("/videos/stream/{}", video.id)))
        .await;
    assert_eq!(stream.as_bytes().as_ref(), b"payload");
}

#[tokio::test]
async fn test_served_content_type_defaults_to_binary() {
    let app = setup_test_app().await;

    // A record stored without a content type, as an upload with no declared type produces.
    let video = app
        .state
        .videos
        .create(
            "untyped".to_string(),
            "no content type".to_string(),
            Box::pin(Cursor::new(b"raw".to_vec())),
            "raw.bin",
            None,
        )
        .await
        .unwrap();

    let listed: Vec<Video> = app.client().get(&api_path("/videos")).await.json();
    assert_eq!(listed[0].content_type, None);

    let stream = app
        .client()
        .get(&api_path(&format!("/videos/stream/{}", video.id)))
        .await;
    assert_eq!(stream.status_code(), 200);
    assert_eq!(stream.header("content-type"), "application/octet-stream");
    assert_eq!(stream.as_bytes().as_ref(), b"raw");
}

#[tokio::test]
async fn test_list_returns_every_upload() {
    let app = setup_test_app().await;
    let client = app.client();

    let empty: Vec<Video> = client.get(&api_path("/videos")).await.json();
    assert!(empty.is_empty());

    let mut ids = Vec::new();
    for i in 0..3 {
        let video: Video = client
            .post(&api_path("/videos"))
            .multipart(video_form(
                &format!("video {}", i),
                "d",
                b"bytes",
                &format!("{}.mp4", i),
                "video/mp4",
            ))
            .await
            .json();
        ids.push(video.id);
    }

    let listed: Vec<Video> = client.get(&api_path("/videos")).await.json();
    assert_eq!(listed.len(), 3);

    for id in &ids {
        let response = client.get(&api_path(&format!("/videos/{}", id))).await;
        assert_eq!(response.status_code(), 200);
        let video: Video = response.json();
        assert_eq!(&video.id, id);
    }
}

#[tokio::test]
async fn test_unknown_id_returns_404() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client.get(&api_path("/videos/does-not-exist")).await;
    assert_eq!(response.status_code(), 404);

    let response = client
        .get(&api_path("/videos/stream/does-not-exist"))
        .await;
    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_missing_file_on_disk_returns_404() {
    let app = setup_test_app().await;
    let client = app.client();

    let video: Video = client
        .post(&api_path("/videos"))
        .multipart(video_form("t", "d", b"bytes", "vanish.mp4", "video/mp4"))
        .await
        .json();
    std::fs::remove_file(&video.storage_path).unwrap();

    let response = client.get(&api_path(&format!("/videos/{}", video.id))).await;
    assert_eq!(response.status_code(), 200);

    let response = client
        .get(&api_path(&format!("/videos/stream/{}", video.id)))
        .await;
    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], format!("Video {} not found", video.id));
    assert!(!body.to_string().contains(&video.storage_path));
}

#[tokio::test]
async fn test_same_filename_last_writer_wins() {
    let app = setup_test_app().await;
    let client = app.client();

    let first: Video = client
        .post(&api_path("/videos"))
        .multipart(video_form("first", "d", b"old bytes", "same.mp4", "video/mp4"))
        .await
        .json();
    let second: Video = client
        .post(&api_path("/videos"))
        .multipart(video_form("second", "d", b"new bytes", "same.mp4", "video/mp4"))
        .await
        .json();

    assert_ne!(first.id, second.id);

    for id in [&first.id, &second.id] {
        let stream = client
            .get(&api_path(&format!("/videos/stream/{}", id)))
            .await;
        assert_eq!(stream.as_bytes().as_ref(), b"new bytes");
    }
}

#[tokio::test]
async fn test_traversal_filename_stays_in_storage_root() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/videos"))
        .multipart(video_form("t", "d", b"evil", "../../etc/passwd", "text/plain"))
        .await;

    assert_eq!(response.status_code(), 200);
    let video: Video = response.json();
    let stored = std::path::PathBuf::from(&video.storage_path);
    assert!(stored.starts_with(app.storage_root()));
    assert_eq!(stored, app.storage_root().join("passwd"));
    assert!(!app.temp_root().join("etc").exists());
}

#[tokio::test]
async fn test_unusable_filename_is_upload_failure() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post(&api_path("/videos"))
        .multipart(video_form("t", "d", b"x", "..", "video/mp4"))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Video not uploaded");
    assert_eq!(body["success"], false);

    let listed: Vec<Video> = client.get(&api_path("/videos")).await.json();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_missing_fields_are_bad_request() {
    let app = setup_test_app().await;
    let client = app.client();

    let no_file = MultipartForm::new()
        .add_text("title", "t")
        .add_text("description", "d");
    let response = client.post(&api_path("/videos")).multipart(no_file).await;
    assert_eq!(response.status_code(), 400);

    let no_title = MultipartForm::new()
        .add_text("description", "d")
        .add_part(
            "file",
            axum_test::multipart::Part::bytes(b"x".to_vec()).file_name("a.mp4"),
        );
    let response = client.post(&api_path("/videos")).multipart(no_title).await;
    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_concurrent_creates_all_recorded() {
    let app = setup_test_app().await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let videos = app.state.videos.clone();
        handles.push(tokio::spawn(async move {
            videos
                .create(
                    format!("video {}", i),
                    "d".to_string(),
                    Box::pin(Cursor::new(vec![i as u8; 64])),
                    &format!("{}.mp4", i),
                    Some("video/mp4".to_string()),
                )
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let listed: Vec<Video> = app.client().get(&api_path("/videos")).await.json();
    assert_eq!(listed.len(), 8);
}

#[tokio::test]
async fn test_health_reports_count() {
    let app = setup_test_app().await;
    let client = app.client();

    client
        .post(&api_path("/videos"))
        .multipart(video_form("t", "d", b"x", "a.mp4", "video/mp4"))
        .await;

    let response = client.get("/health").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["videos"], 1);
}

#[tokio::test]
async fn test_health_unavailable_when_storage_root_removed() {
    let app = setup_test_app().await;

    std::fs::remove_dir_all(app.storage_root()).unwrap();

    let response = app.client().get("/health").await;
    assert_eq!(response.status_code(), 503);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["storage"], "unhealthy");
    assert_eq!(body["database"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_lists_video_routes() {
    let app = setup_test_app().await;

    let response = app.client().get("/api-docs/openapi.json").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert!(body["paths"]["/api/v1/videos"].is_object());
    assert!(body["paths"]["/api/v1/videos/stream/{id}"].is_object());
}
