//! Upload-and-analyze API handler
//!
//! POST /api/session/:id/analyze runs the full linear pipeline for one
//! uploaded WAV file: ingest → decode → extract → normalize → classify →
//! render → log. The pipeline runs to completion within the handler; there
//! is no background task, retry, or partial result.

use axum::{
    extract::{Multipart, Path, State},
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::DisplayState;
use crate::services::audio_loader::{WINDOW_DURATION_SECS, WINDOW_OFFSET_SECS};
use crate::services::ingest::StoreOutcome;
use crate::AppState;

/// POST /api/session/:id/analyze response
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub session_id: Uuid,
    pub filename: String,
    /// Raw classifier label
    pub label: String,
    /// Mapped display state
    pub state: DisplayState,
    pub headline: &'static str,
    pub guidance: &'static str,
    /// Coping tips for states that carry them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tips: Option<&'static [&'static str]>,
    /// Whether a history record was appended (false for a consecutive repeat)
    pub recorded: bool,
    pub analyzed_at: DateTime<Utc>,
}

/// POST /api/session/:session_id/analyze
///
/// Multipart upload with a single `file` field containing a WAV recording.
pub async fn analyze(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> ApiResult<Json<AnalyzeResponse>> {
    // Reject unknown sessions before touching the payload
    if !state.sessions.read().await.contains_key(&session_id) {
        return Err(ApiError::NotFound(format!(
            "Session not found: {}",
            session_id
        )));
    }

    let (filename, bytes) = read_upload(&mut multipart).await?;

    if !infer::audio::is_wav(&bytes) {
        tracing::warn!(session_id = %session_id, filename = %filename, "Rejecting non-WAV upload");
        return Err(ApiError::UnsupportedMedia(
            "Only WAV format audio is accepted".to_string(),
        ));
    }

    let path = match state.store.save(&filename, &bytes)? {
        StoreOutcome::Stored(path) => path,
        StoreOutcome::TooLarge { size, limit } => {
            return Err(ApiError::PayloadTooLarge(format!(
                "File size too large ({} bytes exceeds the {} byte limit). Please upload a smaller file.",
                size, limit
            )));
        }
    };

    let waveform = state
        .loader
        .load_window(&path, WINDOW_OFFSET_SECS, WINDOW_DURATION_SECS)?;
    let features = state.extractor.extract(&waveform)?;
    let scaled = state.scaler.transform(&features)?;
    let label = state.classifier.predict(&scaled)?.to_string();
    let display_state = DisplayState::from_label(&label);

    let recorded = {
        let mut sessions = state.sessions.write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or_else(|| ApiError::NotFound(format!("Session not found: {}", session_id)))?;
        session.record_prediction(&filename, display_state.headline())
    };

    tracing::info!(
        session_id = %session_id,
        filename = %filename,
        label = %label,
        state = ?display_state,
        recorded,
        "Prediction complete"
    );

    Ok(Json(AnalyzeResponse {
        session_id,
        filename,
        label,
        state: display_state,
        headline: display_state.headline(),
        guidance: display_state.guidance(),
        tips: display_state.coping_tips(),
        recorded,
        analyzed_at: Utc::now(),
    }))
}

/// Pull the `file` field out of the multipart payload
async fn read_upload(multipart: &mut Multipart) -> ApiResult<(String, Vec<u8>)> {
    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart: {}", e)))?;

        let Some(field) = field else {
            return Err(ApiError::BadRequest("No file uploaded".to_string()));
        };

        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("unknown").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;

        tracing::debug!(filename = %filename, bytes = bytes.len(), "File data received");
        return Ok((filename, bytes.to_vec()));
    }
}

/// Build analyze routes
pub fn analyze_routes() -> Router<AppState> {
    Router::new().route("/api/session/:session_id/analyze", post(analyze))
}
