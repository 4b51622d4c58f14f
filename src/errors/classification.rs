use serde::{Deserialize, Serialize};

/// User-facing failure categories of the prediction and follow-up flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    MissingInput,
    InvalidRequest,
    ImageNotSuitable,
    /// Validation call failed. Same user-facing effect as `ImageNotSuitable`.
    ValidationServiceUnavailable,
    ClassificationServiceUnavailable,
    MalformedUpstreamResponse,
    CompletionServiceUnavailable,
    Configuration,
}

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub status: u16,
    pub message: &'static str,
    pub details: Option<&'static str>,
}

impl ErrorKind {
    /// Map this kind to its HTTP status and the fixed, user-safe text shown to callers.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            ErrorKind::MissingInput => ErrorClassification {
                error_type: "MissingInput",
                status: 400,
                message: "No image file provided",
                details: Some("Attach an image in the 'image' form field."),
            },
            ErrorKind::InvalidRequest => ErrorClassification {
                error_type: "InvalidRequest",
                status: 400,
                message: "Failed to process the request",
                details: Some("The upload could not be read. Please try again."),
            },
            ErrorKind::ImageNotSuitable => ErrorClassification {
                error_type: "ImageNotSuitable",
                status: 422,
                message: "The uploaded image is not suitable for skin cancer analysis.",
                details: Some("Your image appears to show either healthy, non-cancerous skin or content not relevant for skin cancer analysis."),
            },
            ErrorKind::ValidationServiceUnavailable => ErrorClassification {
                error_type: "ValidationServiceUnavailable",
                status: 422,
                message: "The image validation service is temporarily unavailable.",
                details: Some("Please try uploading your image again in a few moments."),
            },
            ErrorKind::ClassificationServiceUnavailable => ErrorClassification {
                error_type: "ClassificationServiceUnavailable",
                status: 422,
                message: "ML API request failed",
                details: Some("The prediction service is temporarily unavailable. Please try again in a few moments."),
            },
            ErrorKind::MalformedUpstreamResponse => ErrorClassification {
                error_type: "MalformedUpstreamResponse",
                status: 500,
                message: "Invalid response from prediction service",
                details: Some("The service returned an invalid response. Please try again."),
            },
            ErrorKind::CompletionServiceUnavailable => ErrorClassification {
                error_type: "CompletionServiceUnavailable",
                status: 500,
                message: "Failed to process request",
                details: None,
            },
            ErrorKind::Configuration => ErrorClassification {
                error_type: "Configuration",
                status: 500,
                message: "Configuration error",
                details: Some("The analysis service is not configured correctly."),
            },
        }
    }

    pub fn status(&self) -> u16 {
        self.classify().status
    }

    pub fn as_str(&self) -> &'static str {
        self.classify().error_type
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
