//! # Configuration — Explicit Runtime Settings
//!
//! All collaborator settings (store URL, media CDN, timeouts) live in a
//! `Config` struct built once at startup and passed into the server. The
//! content transformers themselves take plain values; nothing in the crate
//! reads ambient environment state after boot.

use std::path::PathBuf;
use std::time::Duration;

/// Default public-page fetch budget: after this, missing sections render empty.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 4_000;

/// Hard ceiling on uploaded image payloads.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Round-trip budget for the media CDN relay.
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 20;

/// Country whose asset bundle is used for unrecognized program countries.
pub const DEFAULT_FALLBACK_COUNTRY: &str = "China";

/// Runtime configuration for the edusite backend.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL (Supabase pooler or direct).
    pub database_url: String,
    /// HTTP listen port.
    pub port: u16,
    /// Directory to serve the exported frontend from, if any.
    pub static_dir: Option<PathBuf>,
    /// Supabase JWT secret for verifying admin tokens. When unset, tokens are
    /// decoded without signature verification (development mode).
    pub jwt_secret: Option<String>,
    /// Budget for the public page's concurrent content fetches.
    pub fetch_timeout: Duration,
    /// Asset bundle used for program countries not in the static map.
    pub fallback_country: String,
    /// Media CDN relay settings; `None` disables the upload endpoint.
    pub media: Option<MediaConfig>,
}

/// Settings for the media CDN upload relay.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// CDN upload endpoint accepting multipart image posts.
    pub upload_url: String,
    /// Bearer token for the CDN, if it requires one.
    pub api_key: Option<String>,
    /// Maximum accepted payload size in bytes.
    pub max_bytes: usize,
    /// Round-trip timeout for a single upload.
    pub timeout: Duration,
}

impl Config {
    /// Build a config with library defaults for everything but the store URL.
    ///
    /// Used by tests and callers that only care about the database; `main`
    /// fills the full struct from CLI flags and environment variables.
    pub fn with_database_url(database_url: &str) -> Self {
        Config {
            database_url: database_url.to_string(),
            port: 7100,
            static_dir: None,
            jwt_secret: None,
            fetch_timeout: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
            fallback_country: DEFAULT_FALLBACK_COUNTRY.to_string(),
            media: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_database_url_uses_defaults() {
        let cfg = Config::with_database_url("postgres://localhost/edusite");
        assert_eq!(cfg.database_url, "postgres://localhost/edusite");
        assert_eq!(cfg.fallback_country, "China");
        assert_eq!(cfg.fetch_timeout, Duration::from_millis(4_000));
        assert!(cfg.media.is_none());
        assert!(cfg.jwt_secret.is_none());
    }
}
