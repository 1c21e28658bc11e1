//! Petrel Telemetry Service
//!
//! Accepts anonymous usage summaries from the desktop app and appends them,
//! one JSON line per request, to a daily log file. The accumulated logs can
//! be listed and fetched back through the same path prefix, protected by
//! HTTP Basic Auth with the configured credential pair.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{trace::TraceLayer, validate_request::ValidateRequestHeaderLayer};
use tracing::debug;

pub mod config;
pub mod error;
pub mod handlers;
pub mod service;

use service::AppState;

/// Create the axum router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Read-back of collected logs is for operators only; ingest stays open.
    let protected = Router::new()
        .route("/desktop/telemetry", get(handlers::list_logs))
        .route("/desktop/telemetry/{file}", get(handlers::serve_log))
        .layer(ValidateRequestHeaderLayer::basic(
            &state.config.username,
            &state.config.password,
        ));

    Router::new()
        .route("/desktop/telemetry", post(handlers::ingest_telemetry))
        .merge(protected)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Initialize the telemetry service from the environment and return the router
pub fn init_telemetry_service() -> Result<Router> {
    debug!("Initializing telemetry service");

    let state =
        Arc::new(AppState::from_env().context("Failed to create telemetry service state")?);

    Ok(create_router(state))
}

pub use config::TelemetryConfig;
pub use error::TelemetryError;
