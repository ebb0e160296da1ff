// HTTP surface
//
// - chat: chat turn and history reset
// - health: liveness probe
// - session: cookie helpers
// - error: ApplicationError -> HTTP response mapping

pub mod chat;
pub mod error;
pub mod health;
pub mod session;

use std::path::Path;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::infrastructure::AppState;

/// Build the application router
///
/// Unmatched requests fall through to the static file directory.
pub fn build_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/api/chat", post(chat::send_message))
        .route("/api/clear", post(chat::clear_history))
        .route("/health", get(health::health))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
