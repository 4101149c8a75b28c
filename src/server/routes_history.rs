//! History admin API — timeline CRUD, update/delete addressed by query id.
//!
//! The admin listing distinguishes a missing `history` table from an empty
//! one: a fresh Supabase project has no table yet, and the admin UI shows
//! setup instructions instead of an empty-state message. Every other entity
//! treats the two cases identically.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use super::middleware_auth::RequireAdmin;
use super::{envelope, write_error, AppState};
use crate::db;

#[derive(Deserialize)]
pub(super) struct HistoryPayload {
    year: i32,
    event: String,
}

impl HistoryPayload {
    fn validate(&self) -> Result<(), &'static str> {
        if self.event.trim().is_empty() {
            return Err("event is required");
        }
        Ok(())
    }
}

/// Update and delete address rows by `?id=N`, not a path segment.
#[derive(Deserialize)]
pub(super) struct IdQuery {
    id: Option<i64>,
}

/// GET /api/history — Admin listing, newest year first.
///
/// A missing table is reported as a distinct "needs setup" state so the
/// admin UI can show migration instructions.
pub(super) async fn handler_history_list(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.db.get_history_admin().await {
        Ok(rows) => envelope::ok_list(rows),
        Err(e) if db::is_undefined_table(&e) => envelope::error_with_message(
            StatusCode::OK,
            "needs_setup",
            "history table not found; run the setup migration in the Supabase dashboard",
        ),
        Err(e) => envelope::internal(&e),
    }
}

/// POST /api/history — Create a timeline row. Year range and event length
/// are enforced by the store's CHECK constraints.
pub(super) async fn handler_history_create(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<HistoryPayload>,
) -> impl IntoResponse {
    if let Err(msg) = payload.validate() {
        return envelope::error(StatusCode::BAD_REQUEST, msg);
    }
    match state
        .db
        .create_history_item(payload.year, payload.event.trim())
        .await
    {
        Ok(row) => envelope::created(row),
        Err(e) => write_error(e),
    }
}

/// PUT /api/history?id=N — Update a timeline row.
pub(super) async fn handler_history_update(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<IdQuery>,
    Json(payload): Json<HistoryPayload>,
) -> impl IntoResponse {
    let Some(id) = query.id else {
        return envelope::error(StatusCode::BAD_REQUEST, "id query parameter is required");
    };
    if let Err(msg) = payload.validate() {
        return envelope::error(StatusCode::BAD_REQUEST, msg);
    }
    match state
        .db
        .update_history_item(id, payload.year, payload.event.trim())
        .await
    {
        Ok(true) => envelope::message("History item updated"),
        Ok(false) => envelope::not_found("History item"),
        Err(e) => write_error(e),
    }
}

/// DELETE /api/history?id=N — Delete a timeline row.
pub(super) async fn handler_history_delete(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<IdQuery>,
) -> impl IntoResponse {
    let Some(id) = query.id else {
        return envelope::error(StatusCode::BAD_REQUEST, "id query parameter is required");
    };
    match state.db.delete_history_item(id).await {
        Ok(true) => envelope::message("History item deleted"),
        Ok(false) => envelope::not_found("History item"),
        Err(e) => envelope::internal(&e),
    }
}
