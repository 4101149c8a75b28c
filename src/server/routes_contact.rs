//! Contact API — singleton contact record and nested social links.
//!
//! The contact record is get-or-create, so the GET always has a row to
//! return. A duplicate social-link platform violates the store's unique
//! index and comes back as a 400 with the store's message, never a silent
//! overwrite.

use std::sync::Arc;

use axum::extract::{Path as AxumPath, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::middleware_auth::RequireAdmin;
use super::{envelope, write_error, AppState};
use crate::db;

#[derive(Deserialize)]
pub(super) struct ContactPayload {
    phone: String,
    email: String,
    address: String,
}

#[derive(Deserialize)]
pub(super) struct SocialLinkPayload {
    platform: String,
    url: String,
}

impl SocialLinkPayload {
    fn validate(&self) -> Result<(), &'static str> {
        if self.platform.trim().is_empty() {
            return Err("platform is required");
        }
        if self.url.trim().is_empty() {
            return Err("url is required");
        }
        Ok(())
    }
}

/// GET /api/contact-info — The singleton contact record with its links.
pub(super) async fn handler_contact_get(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let contact = match state.db.get_or_create_contact_info().await {
        Ok(row) => row,
        Err(e) => return envelope::internal(&e),
    };
    match state.db.get_social_links(contact.id).await {
        Ok(links) => envelope::ok(json!({"contact": contact, "socials": links})),
        Err(e) => envelope::internal(&e),
    }
}

/// PUT /api/contact-info — Update the singleton contact record.
pub(super) async fn handler_contact_update(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<ContactPayload>,
) -> impl IntoResponse {
    match state
        .db
        .update_contact_info(payload.phone.trim(), payload.email.trim(), payload.address.trim())
        .await
    {
        Ok(row) => envelope::ok(row),
        Err(e) => write_error(e),
    }
}

/// GET /api/contact-info/socials — Social links in insertion order.
pub(super) async fn handler_socials_list(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let contact = match state.db.get_or_create_contact_info().await {
        Ok(row) => row,
        Err(e) => return envelope::internal(&e),
    };
    match state.db.get_social_links(contact.id).await {
        Ok(links) => envelope::ok_list(links),
        Err(e) => envelope::internal(&e),
    }
}

/// POST /api/contact-info/socials — Add a social link; duplicate platforms
/// are rejected by the store's unique index.
pub(super) async fn handler_social_create(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<SocialLinkPayload>,
) -> impl IntoResponse {
    if let Err(msg) = payload.validate() {
        return envelope::error(StatusCode::BAD_REQUEST, msg);
    }
    let contact = match state.db.get_or_create_contact_info().await {
        Ok(row) => row,
        Err(e) => return envelope::internal(&e),
    };
    match state
        .db
        .add_social_link(contact.id, payload.platform.trim(), payload.url.trim())
        .await
    {
        Ok(row) => envelope::created(row),
        Err(e) if db::is_unique_violation(&e) => envelope::error_with_message(
            StatusCode::BAD_REQUEST,
            "duplicate_platform",
            &db::store_message(&e),
        ),
        Err(e) => write_error(e),
    }
}

/// PUT /api/contact-info/socials/{id} — Update a social link.
pub(super) async fn handler_social_update(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    AxumPath(id): AxumPath<i64>,
    Json(payload): Json<SocialLinkPayload>,
) -> impl IntoResponse {
    if let Err(msg) = payload.validate() {
        return envelope::error(StatusCode::BAD_REQUEST, msg);
    }
    match state
        .db
        .update_social_link(id, payload.platform.trim(), payload.url.trim())
        .await
    {
        Ok(true) => envelope::message("Social link updated"),
        Ok(false) => envelope::not_found("Social link"),
        Err(e) => write_error(e),
    }
}

/// DELETE /api/contact-info/socials/{id} — Delete a social link.
pub(super) async fn handler_social_delete(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    AxumPath(id): AxumPath<i64>,
) -> impl IntoResponse {
    match state.db.delete_social_link(id).await {
        Ok(true) => envelope::message("Social link deleted"),
        Ok(false) => envelope::not_found("Social link"),
        Err(e) => envelope::internal(&e),
    }
}
