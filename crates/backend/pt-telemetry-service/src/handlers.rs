use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use tracing::instrument;

use crate::{error::TelemetryError, service::AppState};

/// Accept one telemetry summary and append it to today's log.
#[instrument(skip_all, fields(ip = %addr.ip()))]
pub async fn ingest_telemetry(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(summary): Json<Value>,
) -> Result<StatusCode, TelemetryError> {
    state.append_summary(summary, addr.ip()).await?;
    Ok(StatusCode::OK)
}

/// List the collected daily log files.
pub async fn list_logs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, TelemetryError> {
    Ok(Json(state.list_log_files().await?))
}

/// Serve one daily log file as raw newline-delimited JSON.
pub async fn serve_log(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
) -> Result<Response, TelemetryError> {
    let bytes = state.read_log(&file).await?;
    Ok((
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        bytes,
    )
        .into_response())
}
