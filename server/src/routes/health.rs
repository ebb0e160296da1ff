use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::infrastructure::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub mode: String,
    pub sessions: usize,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let sessions = state
        .chat
        .session_repository()
        .count()
        .await
        .unwrap_or_else(|e| {
            warn!("Failed to count sessions: {}", e);
            0
        });

    let mode = if state.chat.is_offline() {
        "offline"
    } else {
        "online"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        mode: mode.to_string(),
        sessions,
    })
}
