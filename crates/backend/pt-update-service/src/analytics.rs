use posthog_rs::Event;

use crate::types::UpdateQuery;

fn capture_async(event: Event) {
    tokio::spawn(async move {
        if let Err(e) = posthog_rs::capture(event).await {
            tracing::error!("Failed to capture posthog event: {}", e);
        }
    });
}

pub fn track_update_check(query: &UpdateQuery, update_available: bool) {
    let mut event = Event::new_anon("update_check");
    if let Some(platform) = query.platform.as_deref() {
        event.insert_prop("platform", platform).ok();
    }
    if let Some(version) = query.version.as_deref() {
        event.insert_prop("reported_version", version).ok();
    }
    event.insert_prop("update_available", update_available).ok();
    capture_async(event);
}

pub fn track_download_redirect(file: &str, version: &str) {
    let mut event = Event::new_anon("download_redirect");
    event.insert_prop("file", file).ok();
    event.insert_prop("version", version).ok();
    capture_async(event);
}
