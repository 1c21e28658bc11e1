use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Json, Response},
};
use tracing::{info, instrument, warn};

use crate::{
    analytics,
    service::{AppState, RELEASES_MANIFEST},
    types::UpdateQuery,
};

/// 302 to a versioned artifact in the release archive.
///
/// `axum::response::Redirect` only produces 303/307/308; the legacy update
/// clients require the exact historical status codes.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_owned())]).into_response()
}

fn moved_permanently(location: &str) -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, location.to_owned())],
    )
        .into_response()
}

/// Direct version check used by the macOS auto-updater.
#[instrument(skip_all, fields(version = ?query.version, platform = ?query.platform))]
pub async fn check_update_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Query(query): Query<UpdateQuery>,
) -> Response {
    // Logged before the decision, malformed input included.
    info!(
        platform = query.platform.as_deref().unwrap_or(""),
        version = query.version.as_deref().unwrap_or(""),
        ip = %addr.ip(),
        "update check"
    );

    match state.check_for_update(query.version.as_deref()) {
        Some(update) => {
            analytics::track_update_check(&query, true);
            (StatusCode::OK, Json(update)).into_response()
        }
        None => {
            analytics::track_update_check(&query, false);
            StatusCode::NO_CONTENT.into_response()
        }
    }
}

/// Release-file check used by the Windows auto-updater.
///
/// Only the `RELEASES` manifest logs an update-check record; requests for
/// versioned installer files historically never did, and existing clients
/// depend on the served behavior staying as-is.
#[instrument(skip_all, fields(file = %file))]
pub async fn release_file_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Path(file): Path<String>,
    Query(query): Query<UpdateQuery>,
) -> Response {
    if file == RELEASES_MANIFEST {
        info!(
            platform = query.platform.as_deref().unwrap_or(""),
            version = query.version.as_deref().unwrap_or(""),
            ip = %addr.ip(),
            "update check"
        );
    }

    let Some(file_version) = state.resolve_file_version(&file) else {
        warn!("no version token in requested release file");
        return StatusCode::NOT_FOUND.into_response();
    };

    let url = state.download_url(&file_version, &file);
    analytics::track_download_redirect(&file, &file_version);
    found(&url)
}

/// Permanent redirect for the deprecated `/app/update` prefix, preserving the
/// path suffix and query string.
pub async fn legacy_update_redirect(uri: Uri) -> Response {
    let original = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let target = original.replacen("/app/", "/desktop/", 1);
    moved_permanently(&target)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use semver::Version;
    use tower::ServiceExt;

    use super::*;
    use crate::config::UpdateConfig;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(UpdateConfig {
            desktop_version: Version::parse("1.5.0").unwrap(),
            releases_url: "https://releases.example.com/petrel".to_string(),
        }))
    }

    fn get(uri: &str) -> Request<Body> {
        let mut request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 51000))));
        request
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn outdated_version_gets_update_json() {
        let app = crate::create_router(test_state());
        let response = app
            .oneshot(get("/desktop/update?version=1.4.9&platform=darwin"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["name"], "Petrel v1.5.0");
        assert_eq!(
            body["url"],
            "https://releases.example.com/petrel/v1.5.0/Petrel-v1.5.0-darwin.zip"
        );
        assert_eq!(body["version"], "1.5.0");
    }

    #[tokio::test]
    async fn current_version_gets_no_content() {
        let app = crate::create_router(test_state());
        let response = app
            .oneshot(get("/desktop/update?version=1.5.0&platform=darwin"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn malformed_version_gets_update_json() {
        let app = crate::create_router(test_state());
        let response = app
            .oneshot(get("/desktop/update?version=not-a-version"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["version"], "1.5.0");
    }

    #[tokio::test]
    async fn missing_version_gets_update_json() {
        let app = crate::create_router(test_state());
        let response = app.oneshot(get("/desktop/update")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn releases_manifest_redirects_to_current_version() {
        let app = crate::create_router(test_state());
        let response = app
            .oneshot(get("/desktop/update/RELEASES?platform=win32"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://releases.example.com/petrel/v1.5.0/RELEASES"
        );
    }

    #[tokio::test]
    async fn versioned_installer_redirects_to_embedded_version() {
        let app = crate::create_router(test_state());
        let response = app
            .oneshot(get("/desktop/update/Petrel-1.4.2-full.nupkg"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://releases.example.com/petrel/v1.4.2/Petrel-1.4.2-full.nupkg"
        );
    }

    #[tokio::test]
    async fn unrecognized_filename_is_not_found() {
        let app = crate::create_router(test_state());
        let response = app.oneshot(get("/desktop/update/garbage")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn legacy_prefix_redirects_preserving_suffix_and_query() {
        let app = crate::create_router(test_state());
        let response = app.oneshot(get("/app/update/foo?x=1")).await.unwrap();

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/desktop/update/foo?x=1"
        );
    }

    #[tokio::test]
    async fn legacy_prefix_without_suffix_redirects() {
        let app = crate::create_router(test_state());
        let response = app.oneshot(get("/app/update?version=1.4.9")).await.unwrap();

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/desktop/update?version=1.4.9"
        );
    }
}
