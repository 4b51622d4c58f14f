use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "server": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "host": { "type": "string" },
                    "port": { "type": "integer", "minimum": 1, "maximum": 65535 },
                    "max_upload_bytes": { "type": "integer", "minimum": 1 },
                    "api_token": { "type": "string" }
                }
            },
            "llm": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "provider": { "type": "string", "enum": ["openai", "openai_compatible", "local"] },
                    "api_key": { "type": "string" },
                    "base_url": { "type": "string" },
                    "vision_model": { "type": "string" },
                    "chat_model": { "type": "string" },
                    "validation_max_tokens": { "type": "integer", "minimum": 1 },
                    "timeout_secs": { "type": "integer", "minimum": 1 }
                }
            },
            "classifier": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "url": { "type": "string" },
                    "timeout_secs": { "type": "integer", "minimum": 1 }
                }
            },
            "session": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "ttl_secs": { "type": "integer", "minimum": 1 },
                    "purge_interval_secs": { "type": "integer", "minimum": 1 }
                }
            }
        }
    })
});
