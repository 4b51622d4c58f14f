use std::time::Duration;
use reqwest::Client;
use crate::errors::OncoscopicError;

pub fn build_http_client(timeout: Duration) -> Result<Client, OncoscopicError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("oncoscopic/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| OncoscopicError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Shorten an upstream body for log lines.
pub fn truncate_for_log(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{}... [truncated]", head)
}

#[cfg(test)]
pub(crate) async fn spawn_stub_server(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
