use std::path::Path;
use crate::cli::commands::ServeArgs;
use crate::config::{self, credentials::mask_secret};
use crate::errors::OncoscopicError;
use crate::api;
use tracing::info;

pub async fn handle_serve(args: ServeArgs) -> Result<(), OncoscopicError> {
    let mut settings = config::load_settings(args.config.as_deref().map(Path::new)).await?;
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }

    info!(
        host = %settings.server.host,
        port = settings.server.port,
        api_key = %mask_secret(&settings.llm.api_key),
        auth = settings.server.api_token.is_some(),
        "Starting API server"
    );

    let state = api::create_app_state(&settings)?;
    let purge = state.sessions.spawn_purge_task(settings.session.ttl, settings.session.purge_interval);
    let app = api::build_router(state);

    let addr = settings.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| OncoscopicError::Server(format!("Server error: {}", e)));

    purge.abort();
    info!("Server stopped");
    result
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
