use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::Value;
use crate::api::errors::{error_response, kind_response};
use crate::api::models::{ChatRequest, CompletionResponse};
use crate::api::AppState;
use crate::errors::ErrorKind;
use crate::models::DiagnosisContext;
use crate::prompts::Language;
use super::session_id;

pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<CompletionResponse>, (StatusCode, Json<Value>)> {
    let Json(req) = body.map_err(|e| error_response(StatusCode::BAD_REQUEST, &e.body_text()))?;

    let query = req.query.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "Query is required"));
    }

    let context = match req.diagnosis.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(label) => Some(DiagnosisContext::declared(label)),
        None => session_id(&headers).and_then(|id| state.sessions.context(&id)),
    };
    let lang = Language::from_code(req.lang.as_deref());

    let response = state.followup
        .ask(query, lang, context.as_ref())
        .await
        .map_err(|_| kind_response(ErrorKind::CompletionServiceUnavailable))?;

    Ok(Json(CompletionResponse { response }))
}
