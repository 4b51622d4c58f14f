use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMResponse {
    pub content: String,
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    pub model: String,
}

/// Chat message with either plain text or multimodal content parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: serde_json::Value,
}

impl Message {
    pub fn system(content: &str) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }
    pub fn user(content: &str) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
    pub fn user_image(image_data_url: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: serde_json::json!([
                { "type": "image_url", "image_url": { "url": image_data_url } }
            ]),
        }
    }
}
