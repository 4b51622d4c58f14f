pub mod routes;
pub mod models;
pub mod errors;
pub mod auth;

use std::sync::Arc;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::clients::{build_http_client, HttpClassifier, LlmImageValidator, LlmTextCompleter};
use crate::config::Settings;
use crate::errors::OncoscopicError;
use crate::llm::create_provider;
use crate::pipeline::{FollowUpOrchestrator, PredictionOrchestrator};
use crate::session::SessionStore;
use tracing::info;

/// Multipart framing overhead allowed on top of the image size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<PredictionOrchestrator>,
    pub followup: Arc<FollowUpOrchestrator>,
    pub sessions: SessionStore,
    pub max_upload_bytes: usize,
    pub api_token: Option<String>,
}

impl AppState {
    pub fn new(predictor: PredictionOrchestrator, followup: FollowUpOrchestrator, max_upload_bytes: usize) -> Self {
        Self {
            predictor: Arc::new(predictor),
            followup: Arc::new(followup),
            sessions: SessionStore::new(),
            max_upload_bytes,
            api_token: None,
        }
    }

    pub fn with_api_token(mut self, token: Option<String>) -> Self {
        self.api_token = token.filter(|t| !t.is_empty());
        self
    }
}

/// Wire the HTTP collaborators described by `settings` into orchestrators.
pub fn create_app_state(settings: &Settings) -> Result<AppState, OncoscopicError> {
    let llm_client = build_http_client(settings.llm.timeout)?;
    let classifier_client = build_http_client(settings.classifier.timeout)?;

    let vision = create_provider(
        &settings.llm.provider,
        llm_client.clone(),
        &settings.llm.api_key,
        Some(&settings.llm.vision_model),
        settings.llm.base_url.as_deref(),
    )?;
    let chat = create_provider(
        &settings.llm.provider,
        llm_client,
        &settings.llm.api_key,
        Some(&settings.llm.chat_model),
        settings.llm.base_url.as_deref(),
    )?;

    info!(
        provider = %settings.llm.provider,
        vision_model = %vision.model_name(),
        chat_model = %chat.model_name(),
        classifier = %settings.classifier.url,
        "Collaborators configured"
    );

    let predictor = PredictionOrchestrator::new(
        Arc::new(LlmImageValidator::new(vision, settings.llm.validation_max_tokens)),
        Arc::new(HttpClassifier::new(classifier_client, &settings.classifier.url)),
    );
    let followup = FollowUpOrchestrator::new(Arc::new(LlmTextCompleter::new(chat)));

    Ok(AppState::new(predictor, followup, settings.server.max_upload_bytes)
        .with_api_token(settings.server.api_token.clone()))
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES);

    let protected = Router::new()
        .route("/api/predict", post(routes::predict::predict))
        .route("/api/chat", post(routes::chat::chat))
        .route("/api/explain", post(routes::explain::explain))
        .route("/api/generate-report", post(routes::report::generate_report))
        .route("/api/session", get(routes::session::get_session).delete(routes::session::clear_session))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::api_auth_middleware));

    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .merge(protected)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
