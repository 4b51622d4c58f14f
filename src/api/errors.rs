use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use crate::errors::{ErrorKind, OncoscopicError};
use crate::models::{Failure, OrchestrationOutcome};

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for Failure {
    fn into_response(self) -> axum::response::Response {
        (status_code(self.status()), Json(self)).into_response()
    }
}

impl IntoResponse for OrchestrationOutcome {
    fn into_response(self) -> axum::response::Response {
        match self {
            OrchestrationOutcome::Success(prediction) => (StatusCode::OK, Json(prediction)).into_response(),
            OrchestrationOutcome::Failure(failure) => failure.into_response(),
        }
    }
}

/// Plain `{error}` body used by the chat, explain and report routes.
pub fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (status, Json(json!({"error": message})))
}

pub fn kind_response(kind: ErrorKind) -> (StatusCode, Json<serde_json::Value>) {
    let class = kind.classify();
    error_response(status_code(class.status), class.message)
}

impl IntoResponse for OncoscopicError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            OncoscopicError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            OncoscopicError::Prediction(kind) => (status_code(kind.status()), kind.classify().message.to_string()),
            // Configuration and upstream detail stays in the logs
            OncoscopicError::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorKind::Configuration.classify().message.to_string())
            }
            OncoscopicError::Client(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorKind::CompletionServiceUnavailable.classify().message.to_string())
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string()),
        };

        (status, Json(json!({"error": message}))).into_response()
    }
}
