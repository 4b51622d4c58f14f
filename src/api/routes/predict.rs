use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::{Multipart, State},
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use crate::api::AppState;
use crate::errors::ErrorKind;
use crate::models::{ImagePayload, OrchestrationOutcome};
use super::{session_id, SESSION_HEADER};
use tracing::{debug, info, warn};

const IMAGE_FIELD: &str = "image";

pub async fn predict(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let client_session = session_id(&headers);
    // A new prediction invalidates whatever the session was grounded on
    let ticket = client_session.as_ref().map(|id| state.sessions.begin(id));

    let outcome = match multipart {
        Ok(multipart) => match read_image(multipart, state.max_upload_bytes).await {
            Ok(image) => state.predictor.run(image).await,
            Err(e) => {
                warn!(error = %e, "Failed to read multipart upload");
                OrchestrationOutcome::failure(ErrorKind::InvalidRequest)
            }
        },
        Err(rejection) => {
            warn!(error = %rejection, "Prediction request is not multipart");
            OrchestrationOutcome::failure(ErrorKind::InvalidRequest)
        }
    };

    // Anonymous callers only get a session once there is a diagnosis to keep
    let session = match (outcome.prediction(), ticket) {
        (Some(prediction), Some(ticket)) => {
            if !state.sessions.commit(&ticket, &prediction.result) {
                info!(session = %ticket.session_id, "Superseded prediction not recorded");
            }
            client_session
        }
        (Some(prediction), None) => {
            let id = uuid::Uuid::new_v4().to_string();
            let ticket = state.sessions.begin(&id);
            state.sessions.commit(&ticket, &prediction.result);
            debug!(session = %id, "Opened session for anonymous prediction");
            Some(id)
        }
        (None, _) => client_session,
    };

    let mut response = outcome.into_response();
    if let Some(value) = session.and_then(|id| HeaderValue::from_str(&id).ok()) {
        response.headers_mut().insert(SESSION_HEADER, value);
    }
    response
}

#[derive(Debug, thiserror::Error)]
enum UploadError {
    #[error(transparent)]
    Multipart(#[from] MultipartError),
    #[error("image exceeds {0} bytes")]
    TooLarge(usize),
}

async fn read_image(mut multipart: Multipart, max_bytes: usize) -> Result<Option<ImagePayload>, UploadError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            debug!(field = ?field.name(), "Ignoring multipart field");
            continue;
        }
        let media_type = field.content_type().map(str::to_string);
        let filename = field.file_name().map(str::to_string);
        let bytes = field.bytes().await?;
        if bytes.len() > max_bytes {
            return Err(UploadError::TooLarge(max_bytes));
        }
        debug!(size = bytes.len(), media_type = ?media_type, "Received image upload");
        return Ok(Some(ImagePayload::new(bytes.to_vec(), media_type.as_deref(), filename.as_deref())));
    }
    Ok(None)
}
