pub mod chat;
pub mod explain;
pub mod health;
pub mod predict;
pub mod report;
pub mod session;

use axum::http::HeaderMap;

pub const SESSION_HEADER: &str = "x-session-id";
const MAX_SESSION_ID_LEN: usize = 128;

/// Client-supplied session id, if present and sane.
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_SESSION_ID_LEN)
        .map(str::to_string)
}
