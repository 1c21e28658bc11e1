//! Version predicates used by the update decision logic

use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

/// Dash-delimited `major.minor.patch` token embedded in a release filename,
/// e.g. `Petrel-1.4.2-full.nupkg`.
static FILE_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-(\d+\.\d+\.\d+)-").expect("valid file version regex"));

/// Whether a client reporting `reported` must update to `current`.
///
/// A missing or syntactically invalid version string counts as
/// update-required, never as an error.
pub fn update_required(reported: Option<&str>, current: &Version) -> bool {
    match reported.map(Version::parse) {
        Some(Ok(v)) => v < *current,
        _ => true,
    }
}

/// Extract the version embedded in a release filename, if any.
pub fn extract_file_version(file: &str) -> Option<&str> {
    FILE_VERSION_RE
        .captures(file)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
