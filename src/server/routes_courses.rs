//! Course admin API — CRUD with the inverse legacy-description transform.
//!
//! The admin form submits explicit duration/level fields; the write path
//! stores them as-is (authoritative) and also re-encodes them into the
//! legacy `description` format so pre-migration readers keep working. The
//! `link` column gets a fixed placeholder and `category` mirrors the
//! duration, matching what the form has always written.

use std::sync::Arc;

use axum::extract::{Path as AxumPath, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use super::middleware_auth::RequireAdmin;
use super::{envelope, write_error, AppState};
use crate::content::courses::{encode_legacy_description, COURSE_LINK_PLACEHOLDER};
use crate::db::CourseWrite;

#[derive(Deserialize)]
pub(super) struct CoursePayload {
    title: String,
    duration: String,
    levelitem1: String,
    levelitem2: String,
    #[serde(default)]
    image: Option<String>,
}

impl CoursePayload {
    fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.duration.trim().is_empty() {
            return Err("duration is required");
        }
        if self.levelitem1.trim().is_empty() || self.levelitem2.trim().is_empty() {
            return Err("both level items are required");
        }
        Ok(())
    }

    /// Column values for persistence, legacy encoding included.
    fn to_write(&self) -> CourseWrite<'_> {
        CourseWrite {
            title: self.title.trim(),
            description: "",
            duration: self.duration.trim(),
            levelitem1: self.levelitem1.trim(),
            levelitem2: self.levelitem2.trim(),
            image: self.image.as_deref(),
            category: self.duration.trim(),
            link: COURSE_LINK_PLACEHOLDER,
        }
    }
}

/// GET /api/courses — List course rows in insertion order.
pub(super) async fn handler_courses_list(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.db.get_courses().await {
        Ok(rows) => envelope::ok_list(rows),
        Err(e) => envelope::internal(&e),
    }
}

/// GET /api/courses/{id} — Single course row.
pub(super) async fn handler_course_get(
    State(state): State<Arc<AppState>>,
    AxumPath(id): AxumPath<i64>,
) -> impl IntoResponse {
    match state.db.get_course(id).await {
        Ok(Some(row)) => envelope::ok(row),
        Ok(None) => envelope::not_found("Course"),
        Err(e) => envelope::internal(&e),
    }
}

/// POST /api/courses — Create a course row.
pub(super) async fn handler_course_create(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<CoursePayload>,
) -> impl IntoResponse {
    if let Err(msg) = payload.validate() {
        return envelope::error(StatusCode::BAD_REQUEST, msg);
    }
    let encoded = encode_legacy_description(
        payload.duration.trim(),
        payload.levelitem1.trim(),
        payload.levelitem2.trim(),
    );
    let write = CourseWrite { description: &encoded, ..payload.to_write() };
    match state.db.create_course(&write).await {
        Ok(row) => envelope::created(row),
        Err(e) => write_error(e),
    }
}

/// PUT /api/courses/{id} — Update a course row.
pub(super) async fn handler_course_update(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    AxumPath(id): AxumPath<i64>,
    Json(payload): Json<CoursePayload>,
) -> impl IntoResponse {
    if let Err(msg) = payload.validate() {
        return envelope::error(StatusCode::BAD_REQUEST, msg);
    }
    let encoded = encode_legacy_description(
        payload.duration.trim(),
        payload.levelitem1.trim(),
        payload.levelitem2.trim(),
    );
    let write = CourseWrite { description: &encoded, ..payload.to_write() };
    match state.db.update_course(id, &write).await {
        Ok(true) => envelope::message("Course updated"),
        Ok(false) => envelope::not_found("Course"),
        Err(e) => write_error(e),
    }
}

/// DELETE /api/courses/{id} — Delete a course row.
pub(super) async fn handler_course_delete(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    AxumPath(id): AxumPath<i64>,
) -> impl IntoResponse {
    match state.db.delete_course(id).await {
        Ok(true) => envelope::message("Course deleted"),
        Ok(false) => envelope::not_found("Course"),
        Err(e) => envelope::internal(&e),
    }
}
