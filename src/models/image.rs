use std::path::Path;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use crate::errors::OncoscopicError;

const FALLBACK_MEDIA_TYPE: &str = "image/jpeg";

/// An uploaded image, held only for the duration of one prediction request.
#[derive(Clone)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub media_type: String,
    pub filename: String,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, media_type: Option<&str>, filename: Option<&str>) -> Self {
        Self {
            bytes,
            media_type: media_type
                .filter(|m| m.starts_with("image/"))
                .unwrap_or(FALLBACK_MEDIA_TYPE)
                .to_string(),
            filename: filename
                .filter(|f| !f.trim().is_empty())
                .unwrap_or("upload.jpg")
                .to_string(),
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, OncoscopicError> {
        if !path.exists() {
            return Err(OncoscopicError::InvalidInput(format!("Image not found: {}", path.display())));
        }
        let bytes = tokio::fs::read(path).await?;
        let filename = path.file_name().and_then(|n| n.to_str());
        Ok(Self::new(bytes, Some(guess_media_type(path)), filename))
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Base64 `data:` URL accepted by vision-capable chat models.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, BASE64.encode(&self.bytes))
    }
}

impl std::fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePayload")
            .field("filename", &self.filename)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

pub fn guess_media_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        "heic" => "image/heic",
        _ => FALLBACK_MEDIA_TYPE,
    }
}
