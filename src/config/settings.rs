use std::time::Duration;
use reqwest::Url;
use crate::errors::OncoscopicError;
use super::credentials::{resolve_credential, resolve_optional};
use super::types::OncoscopicConfig;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_API_KEY_REF: &str = "$OPENAI_API_KEY";
pub const DEFAULT_API_TOKEN_REF: &str = "$ONCOSCOPIC_API_TOKEN";
pub const DEFAULT_CLASSIFIER_URL_REF: &str = "$ML_API_URL";
pub const FALLBACK_CLASSIFIER_URL: &str = "https://oncoscopic-ml-api-51c113766de3.herokuapp.com";
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_VALIDATION_MAX_TOKENS: u32 = 10;
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CLASSIFIER_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;
pub const DEFAULT_PURGE_INTERVAL_SECS: u64 = 300;

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub classifier: ClassifierSettings,
    pub session: SessionSettings,
}

#[derive(Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    /// Bearer token required on `/api/*` routes other than health, if set.
    pub api_token: Option<String>,
}

impl std::fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("api_token", &self.api_token.as_deref().map(super::credentials::mask_secret))
            .finish()
    }
}

#[derive(Clone)]
pub struct LlmSettings {
    pub provider: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub vision_model: String,
    pub chat_model: String,
    pub validation_max_tokens: u32,
    pub timeout: Duration,
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("provider", &self.provider)
            .field("api_key", &super::credentials::mask_secret(&self.api_key))
            .field("base_url", &self.base_url)
            .field("vision_model", &self.vision_model)
            .field("chat_model", &self.chat_model)
            .field("validation_max_tokens", &self.validation_max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    pub url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub ttl: Duration,
    pub purge_interval: Duration,
}

impl Settings {
    /// Fill in defaults and resolve `$VAR` references from the environment.
    pub fn resolve(config: &OncoscopicConfig) -> Self {
        let server = config.server.clone().unwrap_or_default();
        let llm = config.llm.clone().unwrap_or_default();
        let classifier = config.classifier.clone().unwrap_or_default();
        let session = config.session.clone().unwrap_or_default();

        let api_key_ref = llm.api_key.as_deref().unwrap_or(DEFAULT_API_KEY_REF);
        let api_key = resolve_optional(api_key_ref).unwrap_or_default();

        let classifier_url = resolve_optional(
            classifier.url.as_deref().unwrap_or(DEFAULT_CLASSIFIER_URL_REF),
        )
        .unwrap_or_else(|| FALLBACK_CLASSIFIER_URL.to_string());

        Self {
            server: ServerSettings {
                host: server.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: server.port.unwrap_or(DEFAULT_PORT),
                max_upload_bytes: server.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
                api_token: resolve_optional(server.api_token.as_deref().unwrap_or(DEFAULT_API_TOKEN_REF)),
            },
            llm: LlmSettings {
                provider: llm.provider.unwrap_or_else(|| "openai".to_string()),
                api_key,
                base_url: llm.base_url.as_deref().map(resolve_credential),
                vision_model: llm.vision_model.unwrap_or_else(|| DEFAULT_VISION_MODEL.to_string()),
                chat_model: llm.chat_model.unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
                validation_max_tokens: llm.validation_max_tokens.unwrap_or(DEFAULT_VALIDATION_MAX_TOKENS),
                timeout: Duration::from_secs(llm.timeout_secs.unwrap_or(DEFAULT_LLM_TIMEOUT_SECS)),
            },
            classifier: ClassifierSettings {
                url: classifier_url,
                timeout: Duration::from_secs(
                    classifier.timeout_secs.unwrap_or(DEFAULT_CLASSIFIER_TIMEOUT_SECS),
                ),
            },
            session: SessionSettings {
                ttl: Duration::from_secs(session.ttl_secs.unwrap_or(DEFAULT_SESSION_TTL_SECS)),
                purge_interval: Duration::from_secs(
                    session.purge_interval_secs.unwrap_or(DEFAULT_PURGE_INTERVAL_SECS),
                ),
            },
        }
    }

    /// Semantic checks the schema cannot express.
    pub fn validate(&self) -> Result<(), OncoscopicError> {
        validate_http_url("classifier.url", &self.classifier.url)?;
        if let Some(base_url) = &self.llm.base_url {
            validate_http_url("llm.base_url", base_url)?;
        }
        if self.server.max_upload_bytes == 0 {
            return Err(OncoscopicError::Config("server.max_upload_bytes must be greater than 0".into()));
        }
        if self.llm.validation_max_tokens == 0 {
            return Err(OncoscopicError::Config("llm.validation_max_tokens must be greater than 0".into()));
        }
        for (name, value) in [
            ("llm.timeout_secs", self.llm.timeout),
            ("classifier.timeout_secs", self.classifier.timeout),
            ("session.ttl_secs", self.session.ttl),
            ("session.purge_interval_secs", self.session.purge_interval),
        ] {
            if value.is_zero() {
                return Err(OncoscopicError::Config(format!("{} must be greater than 0", name)));
            }
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), OncoscopicError> {
    let url = Url::parse(value)
        .map_err(|e| OncoscopicError::Config(format!("{} is not a valid URL ({}): {}", field, e, value)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(OncoscopicError::Config(format!(
            "{} must use http or https, got '{}'",
            field, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClassifierConfig, LLMConfig, ServerConfig, SessionConfig};

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(&OncoscopicConfig::default());
        assert_eq!(settings.server.host, DEFAULT_HOST);
        assert_eq!(settings.server.port, DEFAULT_PORT);
        assert_eq!(settings.server.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(settings.llm.provider, "openai");
        assert_eq!(settings.llm.vision_model, "gpt-4o");
        assert_eq!(settings.llm.chat_model, "gpt-3.5-turbo");
        assert_eq!(settings.llm.validation_max_tokens, 10);
        assert_eq!(settings.classifier.timeout, Duration::from_secs(30));
        assert_eq!(settings.session.ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_explicit_values_win() {
        let config = OncoscopicConfig {
            server: Some(ServerConfig {
                host: Some("0.0.0.0".into()),
                port: Some(9000),
                max_upload_bytes: Some(1024),
                api_token: Some("tok-0123456789".into()),
            }),
            llm: Some(LLMConfig {
                api_key: Some("sk-inline".into()),
                chat_model: Some("gpt-4o-mini".into()),
                ..Default::default()
            }),
            classifier: Some(ClassifierConfig { url: Some("http://ml.internal:8000".into()), timeout_secs: Some(5) }),
            session: Some(SessionConfig { ttl_secs: Some(60), purge_interval_secs: Some(10) }),
        };
        let settings = Settings::resolve(&config);
        assert_eq!(settings.listen_addr(), "0.0.0.0:9000");
        assert_eq!(settings.llm.api_key, "sk-inline");
        assert_eq!(settings.server.api_token.as_deref(), Some("tok-0123456789"));
        assert_eq!(settings.llm.chat_model, "gpt-4o-mini");
        assert_eq!(settings.classifier.url, "http://ml.internal:8000");
        assert_eq!(settings.classifier.timeout, Duration::from_secs(5));
        assert_eq!(settings.session.purge_interval, Duration::from_secs(10));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_unset_env_reference_falls_back() {
        let config = OncoscopicConfig {
            llm: Some(LLMConfig { api_key: Some("$ONCOSCOPIC_TEST_UNSET_KEY".into()), ..Default::default() }),
            classifier: Some(ClassifierConfig { url: Some("$ONCOSCOPIC_TEST_UNSET_URL".into()), timeout_secs: None }),
            ..Default::default()
        };
        let settings = Settings::resolve(&config);
        assert_eq!(settings.llm.api_key, "");
        assert_eq!(settings.classifier.url, FALLBACK_CLASSIFIER_URL);
    }

    #[test]
    fn test_env_reference_resolves() {
        std::env::set_var("ONCOSCOPIC_TEST_ML_URL", "http://ml-from-env:8000");
        let config = OncoscopicConfig {
            classifier: Some(ClassifierConfig { url: Some("$ONCOSCOPIC_TEST_ML_URL".into()), timeout_secs: None }),
            ..Default::default()
        };
        let settings = Settings::resolve(&config);
        std::env::remove_var("ONCOSCOPIC_TEST_ML_URL");
        assert_eq!(settings.classifier.url, "http://ml-from-env:8000");
    }

    #[test]
    fn test_rejects_bad_classifier_url() {
        let config = OncoscopicConfig {
            classifier: Some(ClassifierConfig { url: Some("ftp://ml.example.com".into()), timeout_secs: None }),
            ..Default::default()
        };
        assert!(Settings::resolve(&config).validate().is_err());

        let config = OncoscopicConfig {
            classifier: Some(ClassifierConfig { url: Some("not a url".into()), timeout_secs: None }),
            ..Default::default()
        };
        assert!(Settings::resolve(&config).validate().is_err());
    }

    #[test]
    fn test_rejects_zero_values() {
        let config = OncoscopicConfig {
            classifier: Some(ClassifierConfig { url: Some("http://ml:8000".into()), timeout_secs: Some(0) }),
            ..Default::default()
        };
        let err = Settings::resolve(&config).validate().unwrap_err();
        assert!(err.to_string().contains("classifier.timeout_secs"));
    }

    #[test]
    fn test_debug_masks_api_key() {
        let config = OncoscopicConfig {
            llm: Some(LLMConfig { api_key: Some("sk-proj-abcdefgh9xQ2".into()), ..Default::default() }),
            ..Default::default()
        };
        let debug = format!("{:?}", Settings::resolve(&config));
        assert!(!debug.contains("abcdefgh"));
        assert!(debug.contains("sk-p...9xQ2"));
    }
}
