//! # Media — CDN Upload Relay
//!
//! Relays admin image uploads to the hosted media CDN and hands the permanent
//! URL back. The relay fails closed: payloads over the size ceiling or with
//! an unaccepted content type are rejected before any network traffic, and a
//! CDN round trip that exceeds the configured budget is an upload failure,
//! never retried or resumed.

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::config::MediaConfig;

/// Image content types the relay accepts.
pub const ACCEPTED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/webp", "image/svg+xml"];

/// Upload failure causes, each with its own user-facing message.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("image is {size} bytes, over the {limit} byte upload limit")]
    Oversize { size: usize, limit: usize },
    #[error("unsupported image type '{0}'; accepted: jpeg, png, webp, svg")]
    UnsupportedType(String),
    #[error("media upload timed out")]
    Timeout,
    #[error("media upload failed: {0}")]
    Upstream(String),
}

#[derive(Deserialize)]
struct CdnResponse {
    url: String,
}

/// Client for the media CDN's multipart upload endpoint.
#[derive(Clone)]
pub struct MediaClient {
    http: reqwest::Client,
    config: MediaConfig,
}

impl MediaClient {
    pub fn new(config: MediaConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(MediaClient { http, config })
    }

    /// Relay one image to the CDN under the given folder label and return the
    /// permanent URL.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
        folder: &str,
    ) -> Result<String, MediaError> {
        if bytes.len() > self.config.max_bytes {
            return Err(MediaError::Oversize {
                size: bytes.len(),
                limit: self.config.max_bytes,
            });
        }
        if !ACCEPTED_IMAGE_TYPES.contains(&content_type) {
            return Err(MediaError::UnsupportedType(content_type.to_string()));
        }

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| MediaError::Upstream(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .text("folder", folder.to_string())
            .part("file", part);

        let mut request = self.http.post(&self.config.upload_url).multipart(form);
        if let Some(ref key) = self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MediaError::Timeout
            } else {
                MediaError::Upstream(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(MediaError::Upstream(format!(
                "CDN returned {}",
                response.status()
            )));
        }

        let body: CdnResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Upstream(e.to_string()))?;
        info!(filename, folder, url = %body.url, "image relayed to CDN");
        Ok(body.url)
    }
}
