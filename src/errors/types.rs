use thiserror::Error;

#[derive(Debug, Error)]
pub enum OncoscopicError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream client error: {0}")]
    Client(#[from] ClientError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A prediction run ended in a user-facing failure (CLI only).
    #[error("Prediction failed: {0}")]
    Prediction(super::classification::ErrorKind),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure of a single outbound call to an external collaborator
/// (classifier service or hosted LLM).
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Connection refused, DNS failure, timeout.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The collaborator answered with a non-2xx status.
    #[error("Upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The body could not be parsed into the expected shape.
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    /// Well-formed reply that carried no completion text.
    #[error("Empty completion: {0}")]
    NoContent(String),

    /// Missing or rejected credentials.
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

impl ClientError {
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ClientError::NotConfigured(_) | ClientError::Upstream { status: 401, .. }
        )
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ClientError::MalformedResponse(_) | ClientError::NoContent(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Transport(format!("request timed out: {}", e))
        } else if e.is_decode() {
            ClientError::MalformedResponse(e.to_string())
        } else if let Some(status) = e.status() {
            ClientError::Upstream { status: status.as_u16(), message: e.to_string() }
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}
