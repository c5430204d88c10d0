//! Shared test helpers for stressd-web integration tests

// Not every test binary uses every helper
#![allow(dead_code)]

pub mod audio_generator;

use axum::body::Body;
use axum::http::{header, Request};
use std::path::Path;
use stressd_common::config::ServiceConfig;
use stressd_web::services::classifier::LinearClassifier;
use stressd_web::services::features::FEATURE_VECTOR_LEN;
use stressd_web::services::scaler::StandardScaler;
use stressd_web::AppState;

/// Identity scaler at the pipeline dimensionality
pub fn identity_scaler() -> StandardScaler {
    StandardScaler {
        mean: vec![0.0; FEATURE_VECTOR_LEN],
        scale: vec![1.0; FEATURE_VECTOR_LEN],
    }
}

/// Classifier whose bias makes it always predict the given label
pub fn constant_classifier(label: &str) -> LinearClassifier {
    LinearClassifier {
        labels: vec![
            label.to_string(),
            "other-a".to_string(),
            "other-b".to_string(),
        ],
        weights: vec![vec![0.0; FEATURE_VECTOR_LEN]; 3],
        bias: vec![1.0, 0.0, 0.0],
    }
}

/// Build app state rooted at a scratch directory, predicting `label`
pub fn test_app_state(root: &Path, label: &str) -> AppState {
    let config = ServiceConfig::with_root(root);
    config.ensure_directories().unwrap();
    AppState::new(&config, identity_scaler(), constant_classifier(label))
}

/// Build a multipart request uploading `bytes` as `filename`
pub fn upload_request(uri: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "stressd-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: audio/wav\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}
