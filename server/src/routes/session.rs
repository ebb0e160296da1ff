use axum::http::{header, HeaderMap, HeaderValue};

use crate::modules::chat::SessionId;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "sid";

/// Read the session token from the request's `Cookie` header
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let prefix = format!("{}=", SESSION_COOKIE);

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .map(str::trim)
        .find_map(|part| part.strip_prefix(&prefix).map(str::to_string))
}

/// `Set-Cookie` value handing a freshly minted session id to the client
pub fn session_cookie(id: &SessionId) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, id
    ))
    .ok()
}
