use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CrashReportConfig {
    /// Directory the minidump and metadata files are written under.
    pub report_dir: PathBuf,
}

impl CrashReportConfig {
    pub fn from_env() -> Self {
        let report_dir = std::env::var("CRASH_REPORT_DIR")
            .unwrap_or_else(|_| "./logs/crash-reports".to_string())
            .into();

        Self { report_dir }
    }
}
