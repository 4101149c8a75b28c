//! Team admin API — staff row CRUD.

use std::sync::Arc;

use axum::extract::{Path as AxumPath, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use super::middleware_auth::RequireAdmin;
use super::{envelope, write_error, AppState};

#[derive(Deserialize)]
pub(super) struct TeamMemberPayload {
    name: String,
    role: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    bio: Option<String>,
}

impl TeamMemberPayload {
    /// Required-field presence check, mirroring the admin form.
    fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if self.role.trim().is_empty() {
            return Err("role is required");
        }
        Ok(())
    }
}

/// GET /api/team — List staff rows in insertion order.
pub(super) async fn handler_team_list(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.db.get_team_members().await {
        Ok(rows) => envelope::ok_list(rows),
        Err(e) => envelope::internal(&e),
    }
}

/// GET /api/team/{id} — Single staff row.
pub(super) async fn handler_team_get(
    State(state): State<Arc<AppState>>,
    AxumPath(id): AxumPath<i64>,
) -> impl IntoResponse {
    match state.db.get_team_member(id).await {
        Ok(Some(row)) => envelope::ok(row),
        Ok(None) => envelope::not_found("Team member"),
        Err(e) => envelope::internal(&e),
    }
}

/// POST /api/team — Create a staff row.
pub(super) async fn handler_team_create(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<TeamMemberPayload>,
) -> impl IntoResponse {
    if let Err(msg) = payload.validate() {
        return envelope::error(StatusCode::BAD_REQUEST, msg);
    }
    match state
        .db
        .create_team_member(
            payload.name.trim(),
            payload.role.trim(),
            payload.image.as_deref(),
            payload.bio.as_deref(),
        )
        .await
    {
        Ok(row) => envelope::created(row),
        Err(e) => write_error(e),
    }
}

/// PUT /api/team/{id} — Update a staff row.
pub(super) async fn handler_team_update(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    AxumPath(id): AxumPath<i64>,
    Json(payload): Json<TeamMemberPayload>,
) -> impl IntoResponse {
    if let Err(msg) = payload.validate() {
        return envelope::error(StatusCode::BAD_REQUEST, msg);
    }
    match state
        .db
        .update_team_member(
            id,
            payload.name.trim(),
            payload.role.trim(),
            payload.image.as_deref(),
            payload.bio.as_deref(),
        )
        .await
    {
        Ok(true) => envelope::message("Team member updated"),
        Ok(false) => envelope::not_found("Team member"),
        Err(e) => write_error(e),
    }
}

/// DELETE /api/team/{id} — Delete a staff row; immediate and irreversible.
pub(super) async fn handler_team_delete(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    AxumPath(id): AxumPath<i64>,
) -> impl IntoResponse {
    match state.db.delete_team_member(id).await {
        Ok(true) => envelope::message("Team member deleted"),
        Ok(false) => envelope::not_found("Team member"),
        Err(e) => envelope::internal(&e),
    }
}
