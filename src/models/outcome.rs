use serde::Serialize;
use crate::errors::ErrorKind;
use crate::prompts::DISCLAIMER;
use super::diagnosis::ClassificationResult;

/// Successful prediction: classifier output plus the fixed disclaimer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    #[serde(flatten)]
    pub result: ClassificationResult,
    pub disclaimer: &'static str,
}

impl Prediction {
    pub fn new(result: ClassificationResult) -> Self {
        Self { result, disclaimer: DISCLAIMER }
    }
}

/// Structured, user-safe failure. Never carries upstream error bodies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    #[serde(skip)]
    pub kind: ErrorKind,
    #[serde(rename = "error")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub disclaimer: &'static str,
}

impl Failure {
    pub fn new(kind: ErrorKind) -> Self {
        let class = kind.classify();
        Self {
            kind,
            message: class.message.to_string(),
            details: class.details.map(str::to_string),
            disclaimer: DISCLAIMER,
        }
    }

    pub fn status(&self) -> u16 {
        self.kind.status()
    }
}

impl From<ErrorKind> for Failure {
    fn from(kind: ErrorKind) -> Self {
        Failure::new(kind)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrchestrationOutcome {
    Success(Prediction),
    Failure(Failure),
}

impl OrchestrationOutcome {
    pub fn success(result: ClassificationResult) -> Self {
        OrchestrationOutcome::Success(Prediction::new(result))
    }

    pub fn failure(kind: ErrorKind) -> Self {
        OrchestrationOutcome::Failure(Failure::new(kind))
    }

    pub fn status(&self) -> u16 {
        match self {
            OrchestrationOutcome::Success(_) => 200,
            OrchestrationOutcome::Failure(f) => f.status(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OrchestrationOutcome::Success(_))
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            OrchestrationOutcome::Success(_) => None,
            OrchestrationOutcome::Failure(f) => Some(f.kind),
        }
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        match self {
            OrchestrationOutcome::Success(p) => Some(p),
            OrchestrationOutcome::Failure(_) => None,
        }
    }

    pub fn disclaimer(&self) -> &'static str {
        match self {
            OrchestrationOutcome::Success(p) => p.disclaimer,
            OrchestrationOutcome::Failure(f) => f.disclaimer,
        }
    }
}
