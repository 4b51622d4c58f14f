use std::fs;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;
use oncoscopic::api::{build_router, create_app_state};
use oncoscopic::config::load_settings;
use oncoscopic::errors::OncoscopicError;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("oncoscopic.yaml");
    fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn test_config_file_drives_app_state() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, r#"
server:
  host: 127.0.0.1
  port: 8099
  max_upload_bytes: 2048
llm:
  provider: local
  base_url: http://127.0.0.1:11434/v1
  vision_model: llava
  chat_model: llama3
classifier:
  url: http://127.0.0.1:8000
  timeout_secs: 5
session:
  ttl_secs: 120
"#);

    let settings = load_settings(Some(&path)).await.unwrap();
    assert_eq!(settings.listen_addr(), "127.0.0.1:8099");
    assert_eq!(settings.llm.vision_model, "llava");
    assert_eq!(settings.session.ttl.as_secs(), 120);

    let state = create_app_state(&settings).unwrap();
    assert_eq!(state.max_upload_bytes, 2048);
    assert_eq!(state.predictor.classifier_backend(), "http");

    let response = build_router(state)
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_local_provider_without_base_url_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "llm:\n  provider: local\n");

    let settings = load_settings(Some(&path)).await.unwrap();
    match create_app_state(&settings) {
        Err(OncoscopicError::Config(msg)) => assert!(msg.contains("base_url")),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("expected configuration error"),
    }
}

#[tokio::test]
async fn test_oversized_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let padding = "#".repeat(1_100_000);
    let path = write_config(&dir, &padding);

    let err = load_settings(Some(&path)).await.unwrap_err();
    assert!(err.to_string().contains("1MB"));
}
