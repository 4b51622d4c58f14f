use serde::{Deserialize, Serialize};
use crate::models::DiagnosisContext;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: Option<String>,
    pub lang: Option<String>,
    /// Explicit grounding label; overrides the session context.
    pub diagnosis: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    pub predicted_class: String,
    pub confidence: Option<f64>,
    pub lang: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub predicted_class: String,
    pub confidence: f64,
    pub llm_response: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub diagnosis: Option<SessionDiagnosis>,
}

#[derive(Debug, Serialize)]
pub struct SessionDiagnosis {
    pub predicted_class: String,
    pub display_label: String,
    pub confidence: Option<f64>,
    pub recorded_at: String,
}

impl From<DiagnosisContext> for SessionDiagnosis {
    fn from(context: DiagnosisContext) -> Self {
        Self {
            display_label: context.display_label().to_string(),
            predicted_class: context.predicted_class,
            confidence: context.confidence,
            recorded_at: context.recorded_at.to_rfc3339(),
        }
    }
}
