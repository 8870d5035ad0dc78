//! Thumbnail upload integration tests.
//!
//! Run with: `cargo test -p tubely-api --test thumbnails_test`

mod helpers;

use helpers::fixtures::{create_minimal_png, file_form};
use helpers::{setup_test_app, setup_test_app_with, TestOptions, ASSETS_BASE_URL};
use regex::Regex;
use tubely_api::{ErrorResponse, UploadLimits};
use tubely_core::Video;
use uuid::Uuid;

fn thumbnail_path(id: Uuid) -> String {
    format!("/videos/{}/thumbnail", id)
}

#[tokio::test]
async fn test_owner_uploads_png_thumbnail() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner).await;
    let png = create_minimal_png();

    let response = app
        .client()
        .post(&thumbnail_path(video.id))
        .add_header("Authorization", app.bearer_for(owner))
        .multipart(file_form("thumbnail", png.clone(), "thumb.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Video = response.json();

    let puts = app.storage.puts();
    assert_eq!(puts.len(), 1);
    let put = &puts[0];
    assert_eq!(put.content_type, "image/png");
    assert_eq!(put.content_length, Some(png.len() as u64));

    let key_pattern = Regex::new(r"^[A-Za-z0-9_-]{43}\.png$").unwrap();
    assert!(key_pattern.is_match(&put.key), "unexpected key {}", put.key);
    assert_eq!(put.url, format!("{}/{}", ASSETS_BASE_URL, put.key));

    assert_eq!(body.thumbnail_url.as_deref(), Some(put.url.as_str()));
    assert_eq!(body.video_url, None);
    assert!(body.updated_at >= video.updated_at);

    let stored = app.stored_video(video.id).await;
    assert_eq!(stored.thumbnail_url, body.thumbnail_url);

    let on_disk = std::fs::read(app.asset_path(&put.key)).unwrap();
    assert_eq!(on_disk, png);
}

#[tokio::test]
async fn test_jpeg_thumbnail_uses_jpeg_extension() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner).await;

    let response = app
        .client()
        .post(&thumbnail_path(video.id))
        .add_header("Authorization", app.bearer_for(owner))
        .multipart(file_form(
            "thumbnail",
            vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10],
            "thumb.jpg",
            "image/jpeg",
        ))
        .await;

    assert_eq!(response.status_code(), 200);
    let puts = app.storage.puts();
    assert!(puts[0].key.ends_with(".jpeg"));
}

#[tokio::test]
async fn test_uploaded_thumbnail_is_served_from_assets() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner).await;
    let png = create_minimal_png();

    app.client()
        .post(&thumbnail_path(video.id))
        .add_header("Authorization", app.bearer_for(owner))
        .multipart(file_form("thumbnail", png.clone(), "thumb.png", "image/png"))
        .await
        .assert_status_ok();

    let key = app.storage.puts()[0].key.clone();
    let response = app.client().get(&format!("/assets/{}", key)).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().to_vec(), png);
}

#[tokio::test]
async fn test_gif_thumbnail_rejected_without_write() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner).await;

    let response = app
        .client()
        .post(&thumbnail_path(video.id))
        .add_header("Authorization", app.bearer_for(owner))
        .multipart(file_form("thumbnail", b"GIF89a".to_vec(), "thumb.gif", "image/gif"))
        .await;

    assert_eq!(response.status_code(), 400);
    let error: ErrorResponse = response.json();
    assert_eq!(error.code, "BAD_REQUEST");

    assert!(app.storage.puts().is_empty());
    assert_eq!(app.videos.update_calls(), 0);
    assert_eq!(app.stored_video(video.id).await.thumbnail_url, None);
}

#[tokio::test]
async fn test_error_details_follow_configured_environment() {
    for (production, expect_details) in [(false, true), (true, false)] {
        let app = setup_test_app_with(TestOptions {
            production,
            ..TestOptions::default()
        })
        .await;
        let owner = Uuid::new_v4();
        let video = app.seed_video(owner).await;

        let response = app
            .client()
            .post(&thumbnail_path(video.id))
            .add_header("Authorization", app.bearer_for(owner))
            .multipart(file_form("thumbnail", b"GIF89a".to_vec(), "thumb.gif", "image/gif"))
            .await;

        assert_eq!(response.status_code(), 400);
        let error: ErrorResponse = response.json();
        assert_eq!(error.details.is_some(), expect_details, "production={}", production);
    }
}

#[tokio::test]
async fn test_non_owner_is_forbidden() {
    let app = setup_test_app().await;
    let video = app.seed_video(Uuid::new_v4()).await;
    let intruder = Uuid::new_v4();

    let response = app
        .client()
        .post(&thumbnail_path(video.id))
        .add_header("Authorization", app.bearer_for(intruder))
        .multipart(file_form("thumbnail", create_minimal_png(), "thumb.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 403);
    let error: ErrorResponse = response.json();
    assert_eq!(error.code, "FORBIDDEN");

    assert!(app.storage.puts().is_empty());
    assert_eq!(app.videos.update_calls(), 0);
}

#[tokio::test]
async fn test_missing_or_invalid_token_is_unauthorized() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner).await;

    let response = app
        .client()
        .post(&thumbnail_path(video.id))
        .multipart(file_form("thumbnail", create_minimal_png(), "thumb.png", "image/png"))
        .await;
    assert_eq!(response.status_code(), 401);

    let response = app
        .client()
        .post(&thumbnail_path(video.id))
        .add_header("Authorization", "Bearer not-a-jwt")
        .multipart(file_form("thumbnail", create_minimal_png(), "thumb.png", "image/png"))
        .await;
    assert_eq!(response.status_code(), 401);

    let other_issuer = tubely_api::auth::JwtService::new("ffffffffffffffffffffffffffffffff", 1);
    let forged = other_issuer.issue_token(owner).unwrap();
    let response = app
        .client()
        .post(&thumbnail_path(video.id))
        .add_header("Authorization", format!("Bearer {}", forged))
        .multipart(file_form("thumbnail", create_minimal_png(), "thumb.png", "image/png"))
        .await;
    assert_eq!(response.status_code(), 401);

    assert!(app.storage.puts().is_empty());
}

#[tokio::test]
async fn test_invalid_video_id_is_bad_request() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();

    let response = app
        .client()
        .post("/videos/not-a-uuid/thumbnail")
        .add_header("Authorization", app.bearer_for(owner))
        .multipart(file_form("thumbnail", create_minimal_png(), "thumb.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 400);
    let error: ErrorResponse = response.json();
    assert_eq!(error.code, "BAD_REQUEST");
}

#[tokio::test]
async fn test_unknown_video_is_not_found() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();

    let response = app
        .client()
        .post(&thumbnail_path(Uuid::new_v4()))
        .add_header("Authorization", app.bearer_for(owner))
        .multipart(file_form("thumbnail", create_minimal_png(), "thumb.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 404);
    assert!(app.storage.puts().is_empty());
}

#[tokio::test]
async fn test_missing_form_field_is_internal_error() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner).await;

    let response = app
        .client()
        .post(&thumbnail_path(video.id))
        .add_header("Authorization", app.bearer_for(owner))
        .multipart(file_form("image", create_minimal_png(), "thumb.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 500);
    let error: ErrorResponse = response.json();
    assert_eq!(error.code, "INTERNAL_ERROR");
    assert!(app.storage.puts().is_empty());
}

#[tokio::test]
async fn test_oversized_thumbnail_is_rejected() {
    let app = setup_test_app_with(TestOptions {
        limits: Some(UploadLimits {
            max_thumbnail_bytes: 1024,
            max_video_bytes: 1024,
        }),
        ..TestOptions::default()
    })
    .await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner).await;

    let response = app
        .client()
        .post(&thumbnail_path(video.id))
        .add_header("Authorization", app.bearer_for(owner))
        .multipart(file_form("thumbnail", vec![0u8; 4096], "big.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 413);
    let error: ErrorResponse = response.json();
    assert_eq!(error.code, "PAYLOAD_TOO_LARGE");
    assert!(app.storage.puts().is_empty());
    assert_eq!(app.videos.update_calls(), 0);
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body, serde_json::json!({ "status": "ok" }));
}
