use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Log file not found: {0}")]
    NotFound(String),
}

impl IntoResponse for TelemetryError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            TelemetryError::NotFound(name) => {
                warn!("telemetry log not found: {}", name);
                (
                    StatusCode::NOT_FOUND,
                    "log_not_found",
                    "No such telemetry log",
                )
            }
            TelemetryError::Io(e) => {
                error!("Error saving telemetry: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "telemetry_write_failed",
                    "Failed to record telemetry",
                )
            }
            TelemetryError::Serialize(e) => {
                error!("Error serializing telemetry: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "telemetry_write_failed",
                    "Failed to record telemetry",
                )
            }
            TelemetryError::Config(e) => {
                error!("Telemetry configuration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "configuration_error",
                    "Telemetry service misconfigured",
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error_code.to_owned(),
                message: message.to_owned(),
            }),
        )
            .into_response()
    }
}
