use std::path::Path;
use crate::errors::OncoscopicError;
use super::types::OncoscopicConfig;
use super::schema::CONFIG_SCHEMA;
use super::settings::Settings;
use tracing::{info, warn};

const MAX_CONFIG_BYTES: u64 = 1_048_576;

pub async fn parse_config(path: &Path) -> Result<OncoscopicConfig, OncoscopicError> {
    if !path.exists() {
        return Err(OncoscopicError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(OncoscopicError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<OncoscopicConfig, OncoscopicError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
    // An empty file parses as null
    if yaml.is_null() {
        return Ok(OncoscopicConfig::default());
    }

    validate_schema(&yaml)?;

    let config: OncoscopicConfig = serde_yaml::from_value(yaml)?;
    Ok(config)
}

/// Load settings from an optional config file, then resolve defaults and
/// environment references and run the semantic checks.
pub async fn load_settings(path: Option<&Path>) -> Result<Settings, OncoscopicError> {
    let config = match path {
        Some(path) => {
            let config = parse_config(path).await?;
            info!(path = %path.display(), "Loaded config file");
            config
        }
        None => OncoscopicConfig::default(),
    };
    let settings = Settings::resolve(&config);
    settings.validate()?;
    Ok(settings)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), OncoscopicError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| OncoscopicError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| OncoscopicError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only, typed parsing below is the hard gate
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}
