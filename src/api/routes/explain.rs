use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use crate::api::errors::{error_response, kind_response};
use crate::api::models::{CompletionResponse, ExplainRequest};
use crate::api::AppState;
use crate::errors::ErrorKind;
use crate::models::ClassificationResult;
use crate::prompts::Language;

pub async fn explain(
    State(state): State<AppState>,
    body: Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Json<CompletionResponse>, (StatusCode, Json<Value>)> {
    let Json(req) = body.map_err(|e| error_response(StatusCode::BAD_REQUEST, &e.body_text()))?;

    let predicted_class = req.predicted_class.trim();
    if predicted_class.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "predicted_class is required"));
    }

    let diagnosis = ClassificationResult::new(predicted_class, req.confidence.unwrap_or_default());
    let lang = Language::from_code(req.lang.as_deref());

    let response = state.followup
        .explain(&diagnosis, lang)
        .await
        .map_err(|_| kind_response(ErrorKind::CompletionServiceUnavailable))?;

    Ok(Json(CompletionResponse { response }))
}
