//! Core update decision logic

use semver::Version;
use tracing::debug;

use crate::{
    config::{APP_DISPLAY_NAME, UpdateConfig},
    types::UpdateResponse,
    version,
};

/// Filename the Windows updater requests to discover available releases.
/// A request for it resolves to the current desktop version.
pub const RELEASES_MANIFEST: &str = "RELEASES";

/// Application state holding the immutable update configuration
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: UpdateConfig,
}

impl AppState {
    pub fn new(config: UpdateConfig) -> Self {
        Self { config }
    }

    pub fn current_version(&self) -> &Version {
        &self.config.desktop_version
    }

    /// Decide the direct version check: `Some(payload)` when the client must
    /// update, `None` when it is already on the latest release.
    pub fn check_for_update(&self, reported_version: Option<&str>) -> Option<UpdateResponse> {
        let current = &self.config.desktop_version;

        if !version::update_required(reported_version, current) {
            debug!(?reported_version, "client is up to date");
            return None;
        }

        Some(UpdateResponse {
            name: format!("{APP_DISPLAY_NAME} v{current}"),
            url: format!(
                "{}/v{current}/{APP_DISPLAY_NAME}-v{current}-darwin.zip",
                self.config.releases_url
            ),
            version: current.to_string(),
        })
    }

    /// Resolve the version a requested release file belongs to.
    ///
    /// The `RELEASES` manifest always resolves to the current desktop
    /// version; any other filename must carry an embedded version token.
    pub fn resolve_file_version(&self, file: &str) -> Option<String> {
        if file == RELEASES_MANIFEST {
            return Some(self.config.desktop_version.to_string());
        }
        version::extract_file_version(file).map(str::to_owned)
    }

    /// Download location of `file` within the release archive for `version`.
    pub fn download_url(&self, version: &str, file: &str) -> String {
        format!("{}/v{version}/{file}", self.config.releases_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        AppState::new(UpdateConfig {
            desktop_version: Version::parse("1.5.0").unwrap(),
            releases_url: "https://releases.example.com/petrel".to_string(),
        })
    }

    #[test]
    fn outdated_client_gets_update_payload() {
        let state = test_state();
        let update = state.check_for_update(Some("1.4.9")).unwrap();
        assert_eq!(update.name, "Petrel v1.5.0");
        assert_eq!(
            update.url,
            "https://releases.example.com/petrel/v1.5.0/Petrel-v1.5.0-darwin.zip"
        );
        assert_eq!(update.version, "1.5.0");
    }

    #[test]
    fn current_client_gets_no_update() {
        let state = test_state();
        assert!(state.check_for_update(Some("1.5.0")).is_none());
        assert!(state.check_for_update(Some("2.0.0")).is_none());
    }

    #[test]
    fn malformed_version_is_treated_as_outdated() {
        let state = test_state();
        assert!(state.check_for_update(Some("not-a-version")).is_some());
        assert!(state.check_for_update(None).is_some());
    }

    #[test]
    fn manifest_resolves_to_current_version() {
        let state = test_state();
        assert_eq!(
            state.resolve_file_version(RELEASES_MANIFEST),
            Some("1.5.0".to_string())
        );
    }

    #[test]
    fn versioned_filename_wins_over_current_version() {
        let state = test_state();
        assert_eq!(
            state.resolve_file_version("Petrel-1.4.2-full.nupkg"),
            Some("1.4.2".to_string())
        );
        assert_eq!(state.resolve_file_version("garbage"), None);
    }
}
