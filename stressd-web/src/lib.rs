//! stressd-web - Stress Detection web service
//!
//! Serves the "Stress Detection" browser surface and runs the upload →
//! decode → extract → normalize → classify pipeline for each submitted WAV
//! recording. The scaler and classifier artifacts are loaded once at
//! startup and shared read-only; per-session state lives in an isolated
//! context per session id.

pub mod api;
pub mod dsp;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use stressd_common::config::ServiceConfig;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::SessionContext;
use crate::services::audio_loader::{AudioLoader, PIPELINE_SAMPLE_RATE};
use crate::services::classifier::LinearClassifier;
use crate::services::features::FeatureExtractor;
use crate::services::ingest::AudioStore;
use crate::services::scaler::StandardScaler;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Per-session contexts keyed by session id
    pub sessions: Arc<RwLock<HashMap<Uuid, SessionContext>>>,
    /// Uploaded-audio store with the size guard
    pub store: Arc<AudioStore>,
    /// Fixed-window audio decoder
    pub loader: Arc<AudioLoader>,
    /// Feature pipeline
    pub extractor: Arc<FeatureExtractor>,
    /// Pre-fitted normalization transform (read-only for process lifetime)
    pub scaler: Arc<StandardScaler>,
    /// Pre-fitted classifier (read-only for process lifetime)
    pub classifier: Arc<LinearClassifier>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        config: &ServiceConfig,
        scaler: StandardScaler,
        classifier: LinearClassifier,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            store: Arc::new(AudioStore::new(
                &config.audio_folder,
                config.max_upload_bytes,
            )),
            loader: Arc::new(AudioLoader::default()),
            extractor: Arc::new(FeatureExtractor::new(PIPELINE_SAMPLE_RATE)),
            scaler: Arc::new(scaler),
            classifier: Arc::new(classifier),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    // Transport body cap sits above the ingest limit so oversized uploads
    // reach the explicit size guard and get the named warning.
    let body_limit = (state.store.max_bytes() as usize) * 2;

    Router::new()
        // UI routes (HTML pages)
        .merge(api::ui_routes())
        // API routes
        .merge(api::session_routes())
        .merge(api::analyze_routes())
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
