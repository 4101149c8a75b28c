//! Public content API — display models for the marketing site.
//!
//! These endpoints run rows through the content pipeline before responding;
//! the admin CRUD endpoints return raw rows instead. The home endpoint
//! fetches every section concurrently under the configured budget, and a
//! section that misses the budget renders empty rather than failing the page
//! (history substitutes its static timeline).

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::warn;

use super::{envelope, AppState};
use crate::content::{courses, history, programs, team};

/// Await a row fetch under the budget; failure or timeout renders empty.
async fn fetch_or_empty<T, F>(budget: Duration, entity: &str, fut: F) -> Vec<T>
where
    F: Future<Output = anyhow::Result<Vec<T>>>,
{
    match tokio::time::timeout(budget, fut).await {
        Ok(Ok(rows)) => rows,
        Ok(Err(e)) => {
            warn!(entity, error = %e, "content fetch failed; rendering empty");
            Vec::new()
        }
        Err(_) => {
            warn!(entity, "content fetch timed out; rendering empty");
            Vec::new()
        }
    }
}

/// GET /api/content/home — All four public sections, fetched concurrently.
pub(super) async fn handler_content_home(
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let budget = state.config.fetch_timeout;
    let (team_rows, course_rows, program_rows, history_rows) = tokio::join!(
        fetch_or_empty(budget, "team", state.db.get_team_members()),
        fetch_or_empty(budget, "courses", state.db.get_courses()),
        fetch_or_empty(budget, "programs", state.db.get_programs()),
        fetch_or_empty(budget, "history", state.db.get_history_public()),
    );
    envelope::ok(json!({
        "team": team::transform_team(team_rows),
        "courses": courses::transform_courses(course_rows),
        "programs": programs::transform_programs(program_rows, &state.config.fallback_country),
        "history": history::timeline(history_rows),
    }))
}

/// GET /api/content/team — Staff cards in editorial order.
pub(super) async fn handler_content_team(
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let rows = fetch_or_empty(state.config.fetch_timeout, "team", state.db.get_team_members()).await;
    envelope::ok_list(team::transform_team(rows))
}

/// GET /api/content/courses — Course cards in catalog order.
pub(super) async fn handler_content_courses(
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let rows = fetch_or_empty(state.config.fetch_timeout, "courses", state.db.get_courses()).await;
    envelope::ok_list(courses::transform_courses(rows))
}

/// GET /api/content/programs — Study-abroad cards in insertion order.
pub(super) async fn handler_content_programs(
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let rows = fetch_or_empty(state.config.fetch_timeout, "programs", state.db.get_programs()).await;
    envelope::ok_list(programs::transform_programs(rows, &state.config.fallback_country))
}

/// GET /api/content/history — Timeline, year ascending; the static fallback
/// covers both an empty and an unreachable store.
pub(super) async fn handler_content_history(
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let rows = fetch_or_empty(
        state.config.fetch_timeout,
        "history",
        state.db.get_history_public(),
    )
    .await;
    envelope::ok_list(history::timeline(rows))
}
