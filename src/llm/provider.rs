use async_trait::async_trait;
use crate::errors::ClientError;
use super::types::LLMResponse;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Free-form text completion
    async fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<LLMResponse, ClientError>;

    /// Completion over a single image passed as a base64 data URL
    async fn complete_with_image(
        &self,
        system: &str,
        image_data_url: &str,
        max_tokens: u32,
    ) -> Result<LLMResponse, ClientError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;
}
