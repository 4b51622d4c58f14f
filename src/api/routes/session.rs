use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::{json, Value};
use crate::api::errors::error_response;
use crate::api::models::SessionResponse;
use crate::api::AppState;
use super::{session_id, SESSION_HEADER};

fn require_session(headers: &HeaderMap) -> Result<String, (StatusCode, Json<Value>)> {
    session_id(headers).ok_or_else(|| {
        error_response(StatusCode::BAD_REQUEST, &format!("Missing {} header", SESSION_HEADER))
    })
}

pub async fn get_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, (StatusCode, Json<Value>)> {
    let id = require_session(&headers)?;
    let diagnosis = state.sessions.context(&id).map(Into::into);
    Ok(Json(SessionResponse { session_id: id, diagnosis }))
}

pub async fn clear_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let id = require_session(&headers)?;
    let cleared = state.sessions.clear(&id);
    Ok(Json(json!({"session_id": id, "cleared": cleared})))
}
