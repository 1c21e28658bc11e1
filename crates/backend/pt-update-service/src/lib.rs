//! Petrel Update Service
//!
//! Tells the desktop auto-updaters when a new release is available.
//!
//! Two historically different update clients talk to this service: the macOS
//! updater submits its version directly (`/desktop/update?version=`), while
//! the Windows updater requests named release files (`/desktop/update/{file}`).
//! Both shapes are served; requests under the deprecated `/app/update` prefix
//! are permanently redirected to `/desktop/update`.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::debug;

pub mod analytics;
pub mod config;
pub mod error;
pub mod handlers;
pub mod service;
pub mod types;
pub mod version;

use service::AppState;

/// Create the axum router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // macOS auto-update endpoint (direct version check)
        .route("/desktop/update", get(handlers::check_update_handler))
        // Windows auto-update endpoint (release-file check)
        .route("/desktop/update/{file}", get(handlers::release_file_handler))
        // Deprecated prefix used by clients up to v0.2.0
        .route("/app/update", get(handlers::legacy_update_redirect))
        .route(
            "/app/update/{*rest}",
            get(handlers::legacy_update_redirect),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Initialize the update service from the environment and return the router
pub fn init_update_service() -> Result<Router> {
    debug!("Initializing update service");

    let config =
        config::UpdateConfig::from_env().context("Failed to load update service config")?;
    let state = Arc::new(AppState::new(config));

    Ok(create_router(state))
}

// Re-export commonly used types
pub use config::{APP_DISPLAY_NAME, UpdateConfig};
pub use error::UpdateServiceError;
pub use types::{UpdateQuery, UpdateResponse};
