use axum::{
    extract::multipart::MultipartError,
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
pub enum CrashReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Malformed multipart upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Missing minidump attachment")]
    MissingMinidump,
}

impl IntoResponse for CrashReportError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            CrashReportError::MissingMinidump => {
                warn!("crash report submitted without a minidump attachment");
                (
                    StatusCode::BAD_REQUEST,
                    "missing_minidump",
                    "A crash report must carry an upload_file_minidump part",
                )
            }
            CrashReportError::Multipart(e) => {
                warn!("malformed crash report upload: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    "malformed_upload",
                    "Could not read the multipart upload",
                )
            }
            CrashReportError::Io(e) => {
                error!("Error saving crash report: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "crash_report_write_failed",
                    "Failed to store the crash report",
                )
            }
            CrashReportError::Serialize(e) => {
                error!("Error serializing crash report metadata: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "crash_report_write_failed",
                    "Failed to store the crash report",
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
