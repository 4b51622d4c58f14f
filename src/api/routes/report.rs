use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::Value;
use crate::api::errors::error_response;
use crate::api::models::ReportRequest;
use crate::models::ClassificationResult;
use crate::reporting::{format_report_markdown, DiagnosisReport, REPORT_FILE_NAME};
use tracing::info;

pub async fn generate_report(
    body: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    let Json(req) = body.map_err(|e| error_response(StatusCode::BAD_REQUEST, &e.body_text()))?;

    let analysis = req.llm_response.as_deref().map(str::trim).unwrap_or_default();
    if analysis.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "llmResponse is required"));
    }
    let diagnosis = ClassificationResult::new(req.predicted_class.trim(), req.confidence);
    if !diagnosis.confidence_in_range() {
        return Err(error_response(StatusCode::BAD_REQUEST, "confidence must be between 0 and 100"));
    }

    let markdown = format_report_markdown(&DiagnosisReport {
        diagnosis: &diagnosis,
        analysis,
        generated_at: Utc::now(),
    });
    info!(diagnosis = %diagnosis.predicted_class, bytes = markdown.len(), "Report generated");

    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", REPORT_FILE_NAME)),
        ],
        markdown,
    ).into_response())
}
