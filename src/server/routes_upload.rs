//! Upload API — multipart image relay to the media CDN.
//!
//! The handler reads the multipart fields, applies the size and type gates,
//! and relays the payload through [`crate::media::MediaClient`]. Violations
//! fail closed with a cause-specific message before anything reaches the
//! CDN; nothing is written to the store on this path.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::json;
use tracing::warn;

use super::middleware_auth::RequireAdmin;
use super::{envelope, AppState};
use crate::media::MediaError;
use crate::prom_metrics::UploadLabel;

/// Folder label used when the form does not send one.
const DEFAULT_FOLDER: &str = "content";

fn count_upload(state: &AppState, outcome: &str) {
    state
        .prom_metrics
        .uploads_total
        .get_or_create(&UploadLabel { outcome: outcome.to_string() })
        .inc();
}

/// POST /api/upload — Relay one image to the CDN, returning its permanent URL.
pub(super) async fn handler_upload(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    mut multipart: Multipart,
) -> Response {
    let Some(media) = state.media.clone() else {
        return envelope::error(
            StatusCode::SERVICE_UNAVAILABLE,
            "media uploads are not configured",
        );
    };

    let mut file: Option<(Vec<u8>, String, String)> = None;
    let mut folder = DEFAULT_FOLDER.to_string();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return envelope::error(
                    StatusCode::BAD_REQUEST,
                    &format!("malformed multipart payload: {}", e),
                );
            }
        };
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                match field.bytes().await {
                    Ok(bytes) => file = Some((bytes.to_vec(), filename, content_type)),
                    Err(e) => {
                        return envelope::error(
                            StatusCode::BAD_REQUEST,
                            &format!("failed to read file field: {}", e),
                        );
                    }
                }
            }
            Some("folder") => {
                if let Ok(value) = field.text().await {
                    if !value.trim().is_empty() {
                        folder = value.trim().to_string();
                    }
                }
            }
            _ => {}
        }
    }

    let Some((bytes, filename, content_type)) = file else {
        return envelope::error(StatusCode::BAD_REQUEST, "file field is required");
    };

    match media.upload(bytes, &filename, &content_type, &folder).await {
        Ok(url) => {
            count_upload(&state, "ok");
            envelope::ok(json!({"url": url, "folder": folder}))
        }
        Err(e) => {
            warn!(error = %e, filename = %filename, "upload rejected");
            let (status, outcome) = match &e {
                MediaError::Oversize { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "oversize"),
                MediaError::UnsupportedType(_) => (StatusCode::BAD_REQUEST, "type"),
                MediaError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
                MediaError::Upstream(_) => (StatusCode::BAD_GATEWAY, "upstream"),
            };
            count_upload(&state, outcome);
            envelope::error(status, &e.to_string())
        }
    }
}
