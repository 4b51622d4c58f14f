use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use crate::errors::ClientError;
use crate::models::{ClassificationResult, ImagePayload};
use super::http::truncate_for_log;
use tracing::{debug, info};

/// Remote lesion classifier. One attempt per call, no retries.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, image: &ImagePayload) -> Result<ClassificationResult, ClientError>;

    /// Backend identifier for logging and health output
    fn backend_name(&self) -> &str;
}

/// Classifier reached over HTTP at `{base_url}/predict`.
pub struct HttpClassifier {
    client: Client,
    base_url: String,
}

impl HttpClassifier {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/predict", self.base_url)
    }

    fn image_part(image: &ImagePayload) -> Part {
        let part = Part::bytes(image.bytes.clone()).file_name(image.filename.clone());
        part.mime_str(&image.media_type)
            .unwrap_or_else(|_| Part::bytes(image.bytes.clone()).file_name(image.filename.clone()))
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, image: &ImagePayload) -> Result<ClassificationResult, ClientError> {
        let endpoint = self.endpoint();
        info!(
            url = %endpoint,
            file_name = %image.filename,
            file_type = %image.media_type,
            file_size = image.len(),
            "Calling classifier"
        );

        let form = Form::new().part("file", Self::image_part(image));
        let resp = self.client
            .post(&endpoint)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        debug!(status = status.as_u16(), body = %truncate_for_log(&text, 500), "Classifier responded");

        if !status.is_success() {
            return Err(ClientError::Upstream {
                status: status.as_u16(),
                message: truncate_for_log(&text, 300),
            });
        }

        let result: ClassificationResult = serde_json::from_str(&text).map_err(|e| {
            ClientError::MalformedResponse(format!("Invalid classifier response: {}", e))
        })?;

        if !result.confidence_in_range() {
            return Err(ClientError::MalformedResponse(format!(
                "Confidence {} outside [0, 100]",
                result.confidence
            )));
        }

        Ok(result)
    }

    fn backend_name(&self) -> &str { "http" }
}
