//! Petrel Crash Report Service
//!
//! Persists crash reports submitted by the desktop app's crash reporter:
//! one minidump binary plus a JSON document with the submitted form fields,
//! stored side by side under a generated filename. The files are forensic
//! artifacts inspected manually; nothing here ever reads them back.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::debug;

pub mod config;
pub mod error;
pub mod handlers;
pub mod service;

use service::AppState;

/// Minidumps from the crash reporter run a few MB; leave generous headroom.
const MAX_REPORT_BYTES: usize = 32 * 1024 * 1024;

/// Create the axum router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/desktop/crash-report", post(handlers::submit_crash_report))
        .layer(DefaultBodyLimit::max(MAX_REPORT_BYTES))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Initialize the crash report service from the environment and return the router
pub fn init_crash_report_service() -> Result<Router> {
    debug!("Initializing crash report service");

    let state =
        Arc::new(AppState::from_env().context("Failed to create crash report service state")?);

    Ok(create_router(state))
}

pub use config::CrashReportConfig;
pub use error::CrashReportError;
