use std::sync::Arc;
use reqwest::Client;
use crate::errors::OncoscopicError;
use super::provider::LLMProvider;
use super::openai::OpenAIProvider;

pub fn create_provider(
    provider_name: &str,
    client: Client,
    api_key: &str,
    model: Option<&str>,
    base_url: Option<&str>,
) -> Result<Arc<dyn LLMProvider>, OncoscopicError> {
    match provider_name {
        "openai" => match base_url {
            Some(url) => Ok(Arc::new(OpenAIProvider::with_base_url(client, api_key, model, url))),
            None => Ok(Arc::new(OpenAIProvider::new(client, api_key, model))),
        },
        "openai_compatible" | "local" => {
            let url = base_url.ok_or_else(|| OncoscopicError::Config(format!(
                "LLM provider '{}' requires llm.base_url",
                provider_name
            )))?;
            Ok(Arc::new(OpenAIProvider::with_base_url(client, api_key, model, url)))
        }
        _ => Err(OncoscopicError::Config(format!("Unknown LLM provider: {}", provider_name))),
    }
}
