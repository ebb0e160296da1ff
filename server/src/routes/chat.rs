use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::session::{session_cookie, session_token};
use crate::infrastructure::AppState;
use crate::modules::chat::{
    ApplicationError, ClearHistoryCommand, Emotion, ResolveSessionCommand, SendMessageCommand,
    SessionId,
};

/// Chat request body
///
/// A body that fails to deserialize (not JSON, `message` not a string) is
/// handled like a missing message and rejected with 400.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub emotion: Emotion,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    pub ok: bool,
}

/// `POST /api/chat`
pub async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<ChatRequest>>,
) -> Response {
    let message = body
        .and_then(|Json(request)| request.message)
        .unwrap_or_default();

    // Validate before touching the session store
    if message.trim().is_empty() {
        return ApplicationError::ValidationError("Empty message".to_string()).into_response();
    }

    let resolved = match state
        .chat
        .resolve_session(ResolveSessionCommand::new(session_token(&headers)))
        .await
    {
        Ok(resolved) => resolved,
        Err(e) => return e.into_response(),
    };

    let mut response = match state
        .chat
        .send_message(SendMessageCommand::new(resolved.session_id.clone(), message))
        .await
    {
        Ok(result) => Json(ChatResponse {
            reply: result.reply,
            emotion: result.emotion,
        })
        .into_response(),
        Err(e) => e.into_response(),
    };

    if resolved.is_new {
        if let Some(cookie) = session_cookie(&resolved.session_id) {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
    }

    response
}

/// `POST /api/clear`
pub async fn clear_history(State(state): State<AppState>, headers: HeaderMap) -> Json<ClearResponse> {
    let session_id = session_token(&headers).and_then(|token| SessionId::parse(&token).ok());

    match state
        .chat
        .clear_history(ClearHistoryCommand::new(session_id))
        .await
    {
        Ok(cleared) => debug!(discarded = cleared.discarded_turns, "History cleared"),
        Err(e) => warn!("Failed to clear history: {}", e),
    }

    Json(ClearResponse { ok: true })
}
