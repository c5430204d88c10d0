//! End-to-end pipeline tests: multipart upload through the full
//! ingest → decode → extract → normalize → classify → log sequence.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use stressd_web::build_router;

use helpers::audio_generator::{generate_wav_bytes, generate_wav_bytes_of_size, AudioConfig};

async fn create_session(app: &axum::Router) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    json["session_id"].as_str().unwrap().to_string()
}

async fn upload(
    app: &axum::Router,
    session_id: &str,
    filename: &str,
    bytes: &[u8],
) -> (StatusCode, Value) {
    let request = helpers::upload_request(
        &format!("/api/session/{}/analyze", session_id),
        filename,
        bytes,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

async fn history(app: &axum::Router, session_id: &str) -> Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/session/{}/history", session_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_accepted_upload_is_classified_and_logged() {
    let tmp = tempfile::tempdir().unwrap();
    let app = build_router(helpers::test_app_state(tmp.path(), "positive"));
    let session_id = create_session(&app).await;

    let wav = generate_wav_bytes(&AudioConfig::default());
    let (status, json) = upload(&app, &session_id, "recording.wav", &wav).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["label"], "positive");
    assert_eq!(json["state"], "unstressed");
    assert_eq!(json["headline"], "Unstressed 😊");
    assert_eq!(json["recorded"], true);
    assert!(json.get("tips").is_none());

    // Stored file content equals the uploaded buffer exactly
    let stored = std::fs::read(tmp.path().join("audio").join("recording.wav")).unwrap();
    assert_eq!(stored, wav);

    let history = history(&app, &session_id).await;
    assert_eq!(history["records"].as_array().unwrap().len(), 1);
    assert_eq!(history["records"][0]["index"], 1);
    assert_eq!(history["records"][0]["filename"], "recording.wav");
    assert_eq!(history["records"][0]["state"], "Unstressed 😊");
}

#[tokio::test]
async fn test_stressed_response_carries_five_tips() {
    let tmp = tempfile::tempdir().unwrap();
    let app = build_router(helpers::test_app_state(tmp.path(), "negative"));
    let session_id = create_session(&app).await;

    let wav = generate_wav_bytes(&AudioConfig::default());
    let (status, json) = upload(&app, &session_id, "tense.wav", &wav).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["headline"], "Stressed ⚠️");
    assert_eq!(json["tips"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_unknown_label_renders_without_failing() {
    let tmp = tempfile::tempdir().unwrap();
    let app = build_router(helpers::test_app_state(tmp.path(), "bewildered"));
    let session_id = create_session(&app).await;

    let wav = generate_wav_bytes(&AudioConfig::default());
    let (status, json) = upload(&app, &session_id, "odd.wav", &wav).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["state"], "unknown");
    assert_eq!(json["headline"], "Unknown");
}

#[tokio::test]
async fn test_large_accepted_upload_near_the_limit() {
    let tmp = tempfile::tempdir().unwrap();
    let app = build_router(helpers::test_app_state(tmp.path(), "neutral"));
    let session_id = create_session(&app).await;

    // ~3.48 MB of real audio: under the 4,000,000-byte limit
    let wav = generate_wav_bytes(&AudioConfig {
        duration_seconds: 79.0,
        ..AudioConfig::default()
    });
    assert!(wav.len() > 3_000_000 && wav.len() <= 4_000_000);

    let (status, json) = upload(&app, &session_id, "long.wav", &wav).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["headline"], "Neutral 😐");

    let history = history(&app, &session_id).await;
    assert_eq!(history["records"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_oversized_upload_rejected_without_side_effects() {
    let tmp = tempfile::tempdir().unwrap();
    let app = build_router(helpers::test_app_state(tmp.path(), "neutral"));
    let session_id = create_session(&app).await;

    let wav = generate_wav_bytes_of_size(&AudioConfig::default(), 5_000_000);
    let (status, json) = upload(&app, &session_id, "huge.wav", &wav).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["error"]["code"], "PAYLOAD_TOO_LARGE");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("File size too large"));

    // Nothing persisted, nothing logged
    assert!(!tmp.path().join("audio").join("huge.wav").exists());
    let history = history(&app, &session_id).await;
    assert!(history["records"].as_array().unwrap().is_empty());
    assert_eq!(history["message"], "No previous predictions available.");
}

#[tokio::test]
async fn test_non_wav_payload_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let app = build_router(helpers::test_app_state(tmp.path(), "neutral"));
    let session_id = create_session(&app).await;

    let (status, json) = upload(&app, &session_id, "notes.txt", b"just some text").await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
    assert!(!tmp.path().join("audio").join("notes.txt").exists());
}

#[tokio::test]
async fn test_upload_to_unknown_session_is_404() {
    let tmp = tempfile::tempdir().unwrap();
    let app = build_router(helpers::test_app_state(tmp.path(), "neutral"));

    let wav = generate_wav_bytes(&AudioConfig::default());
    let (status, json) = upload(&app, &uuid::Uuid::new_v4().to_string(), "a.wav", &wav).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_consecutive_duplicate_suppressed_in_history() {
    let tmp = tempfile::tempdir().unwrap();
    let app = build_router(helpers::test_app_state(tmp.path(), "neutral"));
    let session_id = create_session(&app).await;

    let wav = generate_wav_bytes(&AudioConfig::default());
    let (_, first) = upload(&app, &session_id, "a.wav", &wav).await;
    assert_eq!(first["recorded"], true);

    let (_, repeat) = upload(&app, &session_id, "a.wav", &wav).await;
    assert_eq!(repeat["recorded"], false);

    let (_, second) = upload(&app, &session_id, "b.wav", &wav).await;
    assert_eq!(second["recorded"], true);

    let history = history(&app, &session_id).await;
    let records = history["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["filename"], "a.wav");
    assert_eq!(records[1]["filename"], "b.wav");
}

#[tokio::test]
async fn test_non_consecutive_duplicate_logged_again() {
    let tmp = tempfile::tempdir().unwrap();
    let app = build_router(helpers::test_app_state(tmp.path(), "neutral"));
    let session_id = create_session(&app).await;

    let wav = generate_wav_bytes(&AudioConfig::default());
    upload(&app, &session_id, "a.wav", &wav).await;
    upload(&app, &session_id, "b.wav", &wav).await;
    upload(&app, &session_id, "a.wav", &wav).await;

    let history = history(&app, &session_id).await;
    assert_eq!(history["records"].as_array().unwrap().len(), 3);
}
