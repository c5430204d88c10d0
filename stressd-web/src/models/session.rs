//! Per-session state
//!
//! Each interactive session owns an isolated context: the upload-widget
//! identity counter and the append-only prediction history. Contexts live
//! in the shared session map for the process lifetime; nothing is persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One logged prediction: filename and the rendered state headline
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRecord {
    pub filename: String,
    pub state: String,
    pub recorded_at: DateTime<Utc>,
}

/// Per-session context
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: Uuid,
    /// Upload-widget identity; rotating it invalidates the widget client-side
    pub uploader_key: u64,
    pub history: Vec<PredictionRecord>,
    pub created_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            uploader_key: 0,
            history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Append a prediction unless it repeats the most recent filename.
    ///
    /// Only consecutive repeats are suppressed; the same file appearing
    /// later in the session is logged again. Returns whether a record was
    /// appended.
    pub fn record_prediction(&mut self, filename: &str, state: &str) -> bool {
        if let Some(last) = self.history.last() {
            if last.filename == filename {
                return false;
            }
        }
        self.history.push(PredictionRecord {
            filename: filename.to_string(),
            state: state.to_string(),
            recorded_at: Utc::now(),
        });
        true
    }

    /// Rotate the upload-widget identity; history is untouched
    pub fn reset_uploader(&mut self) -> u64 {
        self.uploader_key += 1;
        self.uploader_key
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
