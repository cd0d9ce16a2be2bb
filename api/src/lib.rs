use std::sync::Arc;

pub mod core {
    pub mod app_state;
    pub mod config;
    pub mod structurer_service;
}
pub mod error_handler;
mod middleware_layer {
    pub mod cors;
}
mod routes;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{error, info};

use crate::{
    core::{app_state::AppState, config::AppConfig},
    error_handler::AppError,
    middleware_layer::cors::cors_layer,
    routes::{
        health::health_route::health_route, mission_plan::mission_plan_route::mission_plan_route,
        nebula::nebula_structurer_route::nebula_structurer_route,
    },
};

pub use crate::core::config::LlmMode;

/// Builds the full router: routes, JSON 404/405 fallbacks, CORS layer.
///
/// Request bodies are unbounded; axum's 2 MB default is lifted.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ai_mission_plan", post(mission_plan_route))
        .route("/ai_nebula_structurer", post(nebula_structurer_route))
        .route("/health", get(health_route))
        .method_not_allowed_fallback(|| async { AppError::MethodNotAllowed })
        .fallback(|| async { AppError::NotFound })
        .layer(DefaultBodyLimit::disable())
        .layer(middleware::from_fn(cors_layer))
        .with_state(state)
}

pub async fn start(config: AppConfig) -> Result<(), AppError> {
    let state = Arc::new(AppState::new(&config)?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.api_address)
        .await
        .map_err(AppError::Bind)?;

    info!(address = %config.api_address, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod router_tests;
