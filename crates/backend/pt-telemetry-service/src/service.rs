//! Daily append-only telemetry log storage

use std::net::IpAddr;
use std::path::PathBuf;

use chrono::Utc;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::{config::TelemetryConfig, error::TelemetryError};

/// Application state holding the immutable telemetry configuration
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: TelemetryConfig,
}

impl AppState {
    /// Create the state and make sure the log directory exists.
    pub fn new(config: TelemetryConfig) -> Result<Self, TelemetryError> {
        std::fs::create_dir_all(&config.log_dir)?;
        Ok(Self { config })
    }

    pub fn from_env() -> Result<Self, TelemetryError> {
        Self::new(TelemetryConfig::from_env()?)
    }

    /// Append one summary to today's log file.
    ///
    /// When the body is a JSON object the requester's IP is inserted as an
    /// extra field; any other JSON value is logged verbatim. The line plus
    /// trailing newline goes out in a single `write_all` on a file opened in
    /// append mode, so concurrent requests land as whole, non-interleaved
    /// lines.
    pub async fn append_summary(
        &self,
        mut summary: Value,
        ip: IpAddr,
    ) -> Result<(), TelemetryError> {
        if let Value::Object(map) = &mut summary {
            map.insert("ip".to_string(), Value::String(ip.to_string()));
        }

        let mut line = serde_json::to_string(&summary)?;
        line.push('\n');

        let path = self.log_path(&Self::today_log_name());
        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .await?;
        file.write_all(line.as_bytes()).await?;

        debug!(path = %path.display(), "telemetry summary appended");
        Ok(())
    }

    /// List the daily log files collected so far, sorted by name (and thereby
    /// by date).
    pub async fn list_log_files(&self) -> Result<Vec<String>, TelemetryError> {
        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.config.log_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if let Ok(name) = entry.file_name().into_string()
                && name.ends_with(".log")
            {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Read one daily log back. The name must be a bare `.log` filename;
    /// anything that could escape the log directory is treated as not found.
    pub async fn read_log(&self, name: &str) -> Result<Vec<u8>, TelemetryError> {
        if !is_valid_log_name(name) {
            return Err(TelemetryError::NotFound(name.to_string()));
        }
        match tokio::fs::read(self.log_path(name)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TelemetryError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn log_path(&self, name: &str) -> PathBuf {
        self.config.log_dir.join(name)
    }

    fn today_log_name() -> String {
        format!("{}.log", Utc::now().format("%Y-%m-%d"))
    }
}

fn is_valid_log_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
        && name.ends_with(".log")
}
