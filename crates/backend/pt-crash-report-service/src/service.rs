//! Crash report storage: minidump binary + JSON metadata dual write

use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use crate::{config::CrashReportConfig, error::CrashReportError};

/// Application state holding the immutable crash report configuration
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: CrashReportConfig,
}

impl AppState {
    /// Create the state and make sure the report directory exists.
    pub fn new(config: CrashReportConfig) -> Result<Self, CrashReportError> {
        std::fs::create_dir_all(&config.report_dir)?;
        Ok(Self { config })
    }

    pub fn from_env() -> Result<Self, CrashReportError> {
        Self::new(CrashReportConfig::from_env())
    }

    /// Store one crash report under a generated filename and return it.
    ///
    /// The minidump goes to `<dir>/<id>` and the submitted form fields, plus
    /// the generated filename, to `<dir>/<id>.json`. The two writes carry no
    /// transactional guarantee; a half-written pair is acceptable degraded
    /// output, never rolled back.
    pub async fn store_report(
        &self,
        mut fields: Map<String, Value>,
        minidump: &[u8],
    ) -> Result<String, CrashReportError> {
        let id = Uuid::new_v4().to_string();
        let binary_path = self.config.report_dir.join(&id);

        tokio::fs::write(&binary_path, minidump).await?;

        fields.insert("filename".to_string(), Value::String(id.clone()));
        let metadata = serde_json::to_vec_pretty(&Value::Object(fields))?;
        tokio::fs::write(binary_path.with_extension("json"), metadata).await?;

        debug!(%id, bytes = minidump.len(), "crash report stored");
        Ok(id)
    }
}
