use std::sync::Arc;
use crate::clients::{Classifier, ImageValidator};
use crate::errors::{ClientError, ErrorKind};
use crate::models::{ImagePayload, OrchestrationOutcome, ValidationVerdict};
use tracing::{error, info, warn};

/// Runs validation then classification, strictly in that order.
pub struct PredictionOrchestrator {
    validator: Arc<dyn ImageValidator>,
    classifier: Arc<dyn Classifier>,
}

impl PredictionOrchestrator {
    pub fn new(validator: Arc<dyn ImageValidator>, classifier: Arc<dyn Classifier>) -> Self {
        Self { validator, classifier }
    }

    pub fn classifier_backend(&self) -> &str {
        self.classifier.backend_name()
    }

    pub async fn run(&self, image: Option<ImagePayload>) -> OrchestrationOutcome {
        let image = match image {
            Some(image) if !image.is_empty() => image,
            _ => {
                warn!("Prediction requested without image data");
                return OrchestrationOutcome::failure(ErrorKind::MissingInput);
            }
        };

        match self.validator.validate(&image).await {
            Ok(ValidationVerdict::Valid) => {}
            Ok(ValidationVerdict::Invalid) => {
                info!(file_name = %image.filename, "Image rejected by validation");
                return OrchestrationOutcome::failure(ErrorKind::ImageNotSuitable);
            }
            Err(e) => {
                error!(error = %e, "Image validation failed");
                return OrchestrationOutcome::failure(validation_failure_kind(&e));
            }
        }

        match self.classifier.classify(&image).await {
            Ok(result) => {
                info!(
                    predicted_class = %result.predicted_class,
                    confidence = result.confidence,
                    identifiable = result.is_identifiable(),
                    "Classification complete"
                );
                OrchestrationOutcome::success(result)
            }
            Err(e) => {
                error!(error = %e, backend = %self.classifier.backend_name(), "Classification failed");
                OrchestrationOutcome::failure(classification_failure_kind(&e))
            }
        }
    }
}

fn validation_failure_kind(e: &ClientError) -> ErrorKind {
    if e.is_configuration() {
        ErrorKind::Configuration
    } else {
        ErrorKind::ValidationServiceUnavailable
    }
}

fn classification_failure_kind(e: &ClientError) -> ErrorKind {
    if e.is_malformed() {
        ErrorKind::MalformedUpstreamResponse
    } else {
        ErrorKind::ClassificationServiceUnavailable
    }
}
