use serde::{Deserialize, Serialize};

/// Raw configuration file contents. Every field is optional; defaults are
/// filled in by [`crate::config::Settings::resolve`].
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OncoscopicConfig {
    pub server: Option<ServerConfig>,
    pub llm: Option<LLMConfig>,
    pub classifier: Option<ClassifierConfig>,
    pub session: Option<SessionConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub max_upload_bytes: Option<usize>,
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LLMConfig {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub vision_model: Option<String>,
    pub chat_model: Option<String>,
    pub validation_max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ClassifierConfig {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SessionConfig {
    pub ttl_secs: Option<u64>,
    pub purge_interval_secs: Option<u64>,
}
