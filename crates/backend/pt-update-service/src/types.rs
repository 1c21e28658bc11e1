//! Data types for the update service

use serde::{Deserialize, Serialize};

/// Update-required payload sent to the macOS auto-updater.
///
/// The `url` points at the versioned darwin zip in the release archive.
#[derive(Serialize, Deserialize, Debug)]
pub struct UpdateResponse {
    pub name: String,
    pub url: String,
    pub version: String,
}

/// Query parameters accepted by both update endpoints.
///
/// Both are free-form: `platform` is only ever logged, and an unparseable
/// `version` is a normal business condition, not an error.
#[derive(Deserialize, Debug, Default)]
pub struct UpdateQuery {
    pub version: Option<String>,
    pub platform: Option<String>,
}
