use std::path::PathBuf;

use crate::error::TelemetryError;

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Directory the daily log files are appended under.
    pub log_dir: PathBuf,
    /// Credential pair protecting the log read-back endpoints.
    pub username: String,
    pub password: String,
}

impl TelemetryConfig {
    pub fn from_env() -> Result<Self, TelemetryError> {
        let log_dir = std::env::var("TELEMETRY_LOG_DIR")
            .unwrap_or_else(|_| "./logs/telemetry".to_string())
            .into();

        let username = std::env::var("TELEMETRY_USERNAME").map_err(|_| {
            TelemetryError::Config("TELEMETRY_USERNAME environment variable must be set".into())
        })?;

        let password = std::env::var("TELEMETRY_PASSWORD").map_err(|_| {
            TelemetryError::Config("TELEMETRY_PASSWORD environment variable must be set".into())
        })?;

        Ok(Self {
            log_dir,
            username,
            password,
        })
    }
}
