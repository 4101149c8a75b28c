//! Study-abroad admin API — CRUD with the delimiter join on write.
//!
//! The admin form edits `description` and `universities` as two fields; the
//! write path re-joins them with the `|` delimiter before persisting,
//! mirroring the split the content pipeline applies on read.

use std::sync::Arc;

use axum::extract::{Path as AxumPath, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use super::middleware_auth::RequireAdmin;
use super::{envelope, write_error, AppState};
use crate::content::programs::join_description;

#[derive(Deserialize)]
pub(super) struct ProgramPayload {
    #[serde(default)]
    program_name: Option<String>,
    country: String,
    description: String,
    universities: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

impl ProgramPayload {
    fn validate(&self) -> Result<(), &'static str> {
        if self.country.trim().is_empty() {
            return Err("country is required");
        }
        if self.description.trim().is_empty() {
            return Err("description is required");
        }
        Ok(())
    }
}

/// GET /api/programs — List program rows in insertion order.
pub(super) async fn handler_programs_list(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.db.get_programs().await {
        Ok(rows) => envelope::ok_list(rows),
        Err(e) => envelope::internal(&e),
    }
}

/// GET /api/programs/{id} — Single program row.
pub(super) async fn handler_program_get(
    State(state): State<Arc<AppState>>,
    AxumPath(id): AxumPath<i64>,
) -> impl IntoResponse {
    match state.db.get_program(id).await {
        Ok(Some(row)) => envelope::ok(row),
        Ok(None) => envelope::not_found("Program"),
        Err(e) => envelope::internal(&e),
    }
}

/// POST /api/programs — Create a program row.
pub(super) async fn handler_program_create(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<ProgramPayload>,
) -> impl IntoResponse {
    if let Err(msg) = payload.validate() {
        return envelope::error(StatusCode::BAD_REQUEST, msg);
    }
    let stored = join_description(payload.description.trim(), payload.universities.trim());
    match state
        .db
        .create_program(
            payload.program_name.as_deref(),
            payload.country.trim(),
            &stored,
            payload.image.as_deref(),
            payload.link.as_deref(),
        )
        .await
    {
        Ok(row) => envelope::created(row),
        Err(e) => write_error(e),
    }
}

/// PUT /api/programs/{id} — Update a program row.
pub(super) async fn handler_program_update(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    AxumPath(id): AxumPath<i64>,
    Json(payload): Json<ProgramPayload>,
) -> impl IntoResponse {
    if let Err(msg) = payload.validate() {
        return envelope::error(StatusCode::BAD_REQUEST, msg);
    }
    let stored = join_description(payload.description.trim(), payload.universities.trim());
    match state
        .db
        .update_program(
            id,
            payload.program_name.as_deref(),
            payload.country.trim(),
            &stored,
            payload.image.as_deref(),
            payload.link.as_deref(),
        )
        .await
    {
        Ok(true) => envelope::message("Program updated"),
        Ok(false) => envelope::not_found("Program"),
        Err(e) => write_error(e),
    }
}

/// DELETE /api/programs/{id} — Delete a program row.
pub(super) async fn handler_program_delete(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    AxumPath(id): AxumPath<i64>,
) -> impl IntoResponse {
    match state.db.delete_program(id).await {
        Ok(true) => envelope::message("Program deleted"),
        Ok(false) => envelope::not_found("Program"),
        Err(e) => envelope::internal(&e),
    }
}
