use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
};
use serde_json::{Map, Value};
use tracing::info;

use crate::{error::CrashReportError, service::AppState};

/// Multipart field name the crash reporter uses for the minidump binary.
const MINIDUMP_FIELD: &str = "upload_file_minidump";

/// Accept one crash report: a minidump part plus arbitrary text fields.
pub async fn submit_crash_report(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<StatusCode, CrashReportError> {
    let mut fields = Map::new();
    let mut minidump = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        if name == MINIDUMP_FIELD {
            minidump = Some(field.bytes().await?);
        } else {
            fields.insert(name, Value::String(field.text().await?));
        }
    }

    let minidump = minidump.ok_or(CrashReportError::MissingMinidump)?;
    let id = state.store_report(fields, &minidump).await?;
    info!(%id, "crash report received");
    Ok(StatusCode::OK)
}
