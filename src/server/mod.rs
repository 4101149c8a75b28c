//! # Server — REST Surface for the Marketing Site and Admin Panel
//!
//! Runs an Axum HTTP server that serves the exported frontend, the public
//! display-model endpoints (`/api/content/*`), and the admin CRUD endpoints
//! per entity. Handlers are thin: fetch rows via [`crate::db`], run them
//! through [`crate::content`], wrap the result in the shared envelope.

pub(crate) mod middleware_auth;
pub mod envelope;
mod routes_contact;
mod routes_content;
mod routes_courses;
mod routes_health;
mod routes_history;
mod routes_programs;
mod routes_team;
mod routes_upload;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::extract::{DefaultBodyLimit, Request};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Instrument};

use crate::config::Config;
use crate::media::MediaClient;
use crate::{db, prom_metrics};

/// Request body ceiling: the upload limit plus headroom for multipart framing.
const BODY_LIMIT_BYTES: usize = 8 * 1024 * 1024;

pub struct AppState {
    pub db: db::Database,
    pub config: Config,
    pub media: Option<MediaClient>,
    pub prom_metrics: prom_metrics::Metrics,
}

impl AppState {
    pub fn with_db(db: db::Database, config: Config) -> Arc<Self> {
        let media = config
            .media
            .clone()
            .and_then(|media_config| match MediaClient::new(media_config) {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!(error = %e, "failed to build media client; uploads disabled");
                    None
                }
            });
        Arc::new(AppState {
            db,
            media,
            prom_metrics: prom_metrics::Metrics::new(),
            config,
        })
    }
}

/// Middleware that records HTTP request duration into the Prometheus
/// histogram, generates (or propagates) a request ID for correlation, and
/// wraps the request in a tracing span using `.instrument()` for proper
/// async propagation.
async fn metrics_middleware(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> axum::response::Response {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let method = req.method().to_string();
    let raw_path = req.uri().path().to_string();
    let norm_path = normalize_path(&raw_path);
    let start = std::time::Instant::now();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %raw_path,
    );
    let response = next.run(req).instrument(span).await;

    let duration = start.elapsed().as_secs_f64();
    state
        .prom_metrics
        .http_request_duration
        .get_or_create(&prom_metrics::HttpLabel { method, path: norm_path })
        .observe(duration);

    let mut response = response;
    if let Ok(value) = request_id.parse() {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

/// Map a failed store write to an envelope response: constraint violations
/// become 400 with the store's message passed through verbatim, anything
/// else is a 500.
pub(crate) fn write_error(err: anyhow::Error) -> axum::response::Response {
    if db::is_constraint_violation(&err) {
        envelope::constraint(&db::store_message(&err))
    } else {
        envelope::internal(&err)
    }
}

/// Normalize URL path to collapse high-cardinality segments (numeric IDs)
/// into placeholders, preventing histogram label explosion.
fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|seg| {
            if !seg.is_empty() && seg.chars().all(|c| c.is_ascii_digit()) {
                ":id".to_string()
            } else {
                seg.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

pub fn build_router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        // Public display models (transformed)
        .route("/api/content/home", get(routes_content::handler_content_home))
        .route("/api/content/team", get(routes_content::handler_content_team))
        .route("/api/content/courses", get(routes_content::handler_content_courses))
        .route("/api/content/programs", get(routes_content::handler_content_programs))
        .route("/api/content/history", get(routes_content::handler_content_history))
        // Admin CRUD per entity (raw rows)
        .route(
            "/api/team",
            get(routes_team::handler_team_list).post(routes_team::handler_team_create),
        )
        .route(
            "/api/team/{id}",
            get(routes_team::handler_team_get)
                .put(routes_team::handler_team_update)
                .delete(routes_team::handler_team_delete),
        )
        .route(
            "/api/courses",
            get(routes_courses::handler_courses_list).post(routes_courses::handler_course_create),
        )
        .route(
            "/api/courses/{id}",
            get(routes_courses::handler_course_get)
                .put(routes_courses::handler_course_update)
                .delete(routes_courses::handler_course_delete),
        )
        .route(
            "/api/programs",
            get(routes_programs::handler_programs_list)
                .post(routes_programs::handler_program_create),
        )
        .route(
            "/api/programs/{id}",
            get(routes_programs::handler_program_get)
                .put(routes_programs::handler_program_update)
                .delete(routes_programs::handler_program_delete),
        )
        // History addresses update/delete by query-string id
        .route(
            "/api/history",
            get(routes_history::handler_history_list)
                .post(routes_history::handler_history_create)
                .put(routes_history::handler_history_update)
                .delete(routes_history::handler_history_delete),
        )
        // Contact singleton and nested social links
        .route(
            "/api/contact-info",
            get(routes_contact::handler_contact_get).put(routes_contact::handler_contact_update),
        )
        .route(
            "/api/contact-info/socials",
            get(routes_contact::handler_socials_list).post(routes_contact::handler_social_create),
        )
        .route(
            "/api/contact-info/socials/{id}",
            axum::routing::put(routes_contact::handler_social_update)
                .delete(routes_contact::handler_social_delete),
        )
        // Media relay
        .route("/api/upload", axum::routing::post(routes_upload::handler_upload))
        // Probes and exposition
        .route("/healthz", get(routes_health::handler_healthz))
        .route("/readyz", get(routes_health::handler_readyz))
        .route("/metrics", get(routes_health::handler_metrics));

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true));
    }

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
    .layer(CatchPanicLayer::new())
    .layer(axum::middleware::from_fn_with_state(
        state.clone(),
        metrics_middleware,
    ))
    .layer(TraceLayer::new_for_http())
    .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
    .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
    .layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_secs(30),
    ))
    .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let database = db::Database::connect(&config.database_url).await?;
    let port = config.port;
    let static_dir = config.static_dir.clone();
    let state = AppState::with_db(database, config);
    let app = build_router(state.clone(), static_dir.as_deref());

    // Background task: sample connection pool gauges
    let gauge_state = Arc::clone(&state);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30));
        loop {
            interval.tick().await;
            let pool_size = gauge_state.db.pool().size();
            let pool_idle = gauge_state.db.pool().num_idle();
            gauge_state
                .prom_metrics
                .db_pool_active
                .set((pool_size as i64) - (pool_idle as i64));
            gauge_state.prom_metrics.db_pool_idle.set(pool_idle as i64);
        }
    });

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!(port, "edusite backend running");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("edusite backend shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler");
        tokio::select! { _ = ctrl_c => info!("received SIGINT, shutting down"), _ = sigterm.recv() => info!("received SIGTERM, shutting down") }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("received SIGINT, shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_path_preserves_api_routes() {
        assert_eq!(normalize_path("/api/content/team"), "/api/content/team");
        assert_eq!(normalize_path("/api/contact-info"), "/api/contact-info");
        assert_eq!(normalize_path("/metrics"), "/metrics");
    }

    #[test]
    fn normalize_path_collapses_numeric_ids() {
        assert_eq!(normalize_path("/api/courses/42"), "/api/courses/:id");
        assert_eq!(
            normalize_path("/api/contact-info/socials/7"),
            "/api/contact-info/socials/:id"
        );
    }

    #[test]
    fn normalize_path_handles_empty_and_root() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "");
    }
}
