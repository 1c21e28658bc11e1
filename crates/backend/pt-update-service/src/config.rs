use semver::Version;

use crate::error::UpdateServiceError;

/// Display name used in the update payload shown to macOS users.
pub const APP_DISPLAY_NAME: &str = "Petrel";

const DEFAULT_RELEASES_URL: &str =
    "https://github.com/petrel-app/petrel-desktop/releases/download";

#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// Current published release of the desktop app. Parsed once at startup,
    /// never mutated.
    pub desktop_version: Version,
    /// Base URL of the release archive, without a trailing slash.
    pub releases_url: String,
}

impl UpdateConfig {
    pub fn from_env() -> Result<Self, UpdateServiceError> {
        let raw = std::env::var("DESKTOP_VERSION").map_err(|_| {
            UpdateServiceError::Config("DESKTOP_VERSION environment variable must be set".into())
        })?;

        let desktop_version = Version::parse(&raw).map_err(|e| {
            UpdateServiceError::Config(format!(
                "DESKTOP_VERSION '{raw}' is not a valid semantic version: {e}"
            ))
        })?;

        let releases_url = std::env::var("RELEASES_URL")
            .unwrap_or_else(|_| DEFAULT_RELEASES_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            desktop_version,
            releases_url,
        })
    }
}
