//! Session lifecycle API handlers
//!
//! POST /api/session, POST /api/session/:id/reset, GET /api/session/:id/history

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::SessionContext;
use crate::AppState;

/// POST /api/session response
#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub uploader_key: u64,
}

/// POST /api/session/:id/reset response
#[derive(Debug, Serialize)]
pub struct ResetSessionResponse {
    pub session_id: Uuid,
    pub uploader_key: u64,
}

/// One history entry, 1-indexed in insertion order
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub index: usize,
    pub filename: String,
    pub state: String,
    pub recorded_at: DateTime<Utc>,
}

/// GET /api/session/:id/history response
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: Uuid,
    pub records: Vec<HistoryEntry>,
    /// Informational message when the history is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// POST /api/session
///
/// Create a fresh session context. The page script stores the returned id
/// for the lifetime of the browser session.
pub async fn create_session(State(state): State<AppState>) -> Json<CreateSessionResponse> {
    let session = SessionContext::new();
    let response = CreateSessionResponse {
        session_id: session.session_id,
        uploader_key: session.uploader_key,
    };

    state
        .sessions
        .write()
        .await
        .insert(session.session_id, session);

    tracing::info!(session_id = %response.session_id, "Session created");
    Json(response)
}

/// POST /api/session/:session_id/reset
///
/// Rotate the upload-widget identity so the page accepts a new file.
/// Stored files and history are untouched.
pub async fn reset_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<ResetSessionResponse>> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| ApiError::NotFound(format!("Session not found: {}", session_id)))?;

    let uploader_key = session.reset_uploader();
    tracing::debug!(session_id = %session_id, uploader_key, "Upload widget reset");

    Ok(Json(ResetSessionResponse {
        session_id,
        uploader_key,
    }))
}

/// GET /api/session/:session_id/history
///
/// Prediction records in insertion order with 1-based indexing.
pub async fn session_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<HistoryResponse>> {
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&session_id)
        .ok_or_else(|| ApiError::NotFound(format!("Session not found: {}", session_id)))?;

    let records: Vec<HistoryEntry> = session
        .history
        .iter()
        .enumerate()
        .map(|(i, record)| HistoryEntry {
            index: i + 1,
            filename: record.filename.clone(),
            state: record.state.clone(),
            recorded_at: record.recorded_at,
        })
        .collect();

    let message = if records.is_empty() {
        Some("No previous predictions available.".to_string())
    } else {
        None
    };

    Ok(Json(HistoryResponse {
        session_id,
        records,
        message,
    }))
}

/// Build session routes
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/api/session", post(create_session))
        .route("/api/session/:session_id/reset", post(reset_session))
        .route("/api/session/:session_id/history", get(session_history))
}
