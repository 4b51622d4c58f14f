use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use crate::clients::http::truncate_for_log;
use crate::config::credentials::redact_credentials;
use crate::errors::ClientError;
use super::provider::LLMProvider;
use super::types::{LLMResponse, Message};
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAIProvider {
    pub fn new(client: Client, api_key: &str, model: Option<&str>) -> Self {
        Self::with_base_url(client, api_key, model, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(client: Client, api_key: &str, model: Option<&str>, base_url: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            model: model.unwrap_or("gpt-4o").to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Without `max_tokens` the completion length is left to the server.
    async fn send(&self, messages: Vec<Message>, max_tokens: Option<u32>) -> Result<LLMResponse, ClientError> {
        // Self-hosted compatible servers usually run without a key
        let has_key = !self.api_key.trim().is_empty();
        if !has_key && self.base_url == DEFAULT_BASE_URL {
            return Err(ClientError::NotConfigured("OpenAI API key is not configured".into()));
        }

        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });
        if let Some(limit) = max_tokens {
            body["max_tokens"] = json!(limit);
        }

        let mut request = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);
        if has_key {
            request = request.bearer_auth(&self.api_key);
        }
        let resp = request.send().await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or_else(|| truncate_for_log(&text, 300));
            let message = redact_credentials(&message, &[self.api_key.as_str()]);
            warn!(status = status.as_u16(), model = %self.model, error = %message, "OpenAI request rejected");
            return Err(ClientError::Upstream { status: status.as_u16(), message });
        }

        let data: Value = serde_json::from_str(&text)
            .map_err(|e| ClientError::MalformedResponse(format!("Failed to parse OpenAI response: {}", e)))?;

        if let Some(error) = data.get("error") {
            let message = error["message"].as_str().unwrap_or("Unknown").to_string();
            return Err(ClientError::Upstream { status: status.as_u16(), message });
        }

        let content = data["choices"][0]["message"]["content"].as_str()
            .ok_or_else(|| ClientError::NoContent("No content in OpenAI response".into()))?
            .to_string();
        let input_tokens = data["usage"]["prompt_tokens"].as_u64();
        let output_tokens = data["usage"]["completion_tokens"].as_u64();

        debug!(model = %self.model, ?input_tokens, ?output_tokens, "OpenAI completion received");

        Ok(LLMResponse {
            content,
            input_tokens,
            output_tokens,
            model: self.model.clone(),
        })
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<LLMResponse, ClientError> {
        let mut messages = Vec::new();
        if let Some(sys) = system {
            messages.push(Message::system(sys));
        }
        messages.push(Message::user(prompt));
        self.send(messages, None).await
    }

    async fn complete_with_image(
        &self,
        system: &str,
        image_data_url: &str,
        max_tokens: u32,
    ) -> Result<LLMResponse, ClientError> {
        let messages = vec![Message::system(system), Message::user_image(image_data_url)];
        self.send(messages, Some(max_tokens)).await
    }

    fn provider_name(&self) -> &str { "openai" }
    fn model_name(&self) -> &str { &self.model }
}
