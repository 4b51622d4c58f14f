use std::sync::Arc;
use async_trait::async_trait;
use crate::errors::ClientError;
use crate::llm::LLMProvider;
use crate::models::{ImagePayload, ValidationVerdict};
use crate::prompts::VALIDATION_PROMPT;
use tracing::{info, warn};

/// Decides whether an image is suitable for lesion analysis.
#[async_trait]
pub trait ImageValidator: Send + Sync {
    async fn validate(&self, image: &ImagePayload) -> Result<ValidationVerdict, ClientError>;
}

/// Vision-LLM backed validator. Anything other than a clean `VALID` rejects.
pub struct LlmImageValidator {
    llm: Arc<dyn LLMProvider>,
    max_tokens: u32,
}

impl LlmImageValidator {
    pub fn new(llm: Arc<dyn LLMProvider>, max_tokens: u32) -> Self {
        Self { llm, max_tokens }
    }
}

#[async_trait]
impl ImageValidator for LlmImageValidator {
    async fn validate(&self, image: &ImagePayload) -> Result<ValidationVerdict, ClientError> {
        info!(model = %self.llm.model_name(), file_name = %image.filename, "Starting image validation");

        let completion = match self.llm
            .complete_with_image(VALIDATION_PROMPT, &image.data_url(), self.max_tokens)
            .await
        {
            Ok(resp) => resp.content,
            // A parsed reply without text reads as an empty answer;
            // an unparseable one is a service failure.
            Err(ClientError::NoContent(reason)) => {
                warn!(reason = %reason, "Validation response had no usable content");
                String::new()
            }
            Err(e) => return Err(e),
        };

        let verdict = ValidationVerdict::from_completion(&completion);
        info!(result = %completion.trim(), ?verdict, "Validation result");
        Ok(verdict)
    }
}
