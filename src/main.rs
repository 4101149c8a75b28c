//! # Main — CLI Entry Point
//!
//! Parses flags and environment into an explicit [`Config`] and starts the
//! HTTP server. Shared concerns handled here: `.env` loading, structured
//! logging setup (`LOG_FORMAT=json` for K8s, human-readable otherwise), and
//! the Tokio runtime.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use edusite::config::{
    Config, MediaConfig, DEFAULT_FALLBACK_COUNTRY, DEFAULT_FETCH_TIMEOUT_MS,
    DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_UPLOAD_TIMEOUT_SECS,
};

#[derive(Parser)]
#[command(name = "edusite", about = "Content backend for the edusite marketing site")]
struct Cli {
    /// PostgreSQL connection URL (Supabase pooler or direct)
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// HTTP listen port
    #[arg(long, env = "PORT", default_value_t = 7100)]
    port: u16,

    /// Directory to serve the exported frontend from (e.g. Next.js export)
    #[arg(long, env = "STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Supabase JWT secret; omit to decode admin tokens without verification
    #[arg(long, env = "SUPABASE_JWT_SECRET")]
    jwt_secret: Option<String>,

    /// Budget for the public page's concurrent content fetches, in milliseconds
    #[arg(long, env = "FETCH_TIMEOUT_MS", default_value_t = DEFAULT_FETCH_TIMEOUT_MS)]
    fetch_timeout_ms: u64,

    /// Country whose asset bundle backs unrecognized program countries
    #[arg(long, env = "FALLBACK_COUNTRY", default_value = DEFAULT_FALLBACK_COUNTRY)]
    fallback_country: String,

    /// Media CDN upload endpoint; omit to disable /api/upload
    #[arg(long, env = "MEDIA_UPLOAD_URL")]
    media_upload_url: Option<String>,

    /// Bearer token for the media CDN
    #[arg(long, env = "MEDIA_API_KEY")]
    media_api_key: Option<String>,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize structured logging: LOG_FORMAT=json for K8s, human-readable otherwise
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt().json().with_target(false).init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();

    let media = cli.media_upload_url.map(|upload_url| MediaConfig {
        upload_url,
        api_key: cli.media_api_key,
        max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        timeout: Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS),
    });

    let config = Config {
        database_url: cli.database_url,
        port: cli.port,
        static_dir: cli.static_dir,
        jwt_secret: cli.jwt_secret,
        fetch_timeout: Duration::from_millis(cli.fetch_timeout_ms),
        fallback_country: cli.fallback_country,
        media,
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(edusite::server::run(config))
}
