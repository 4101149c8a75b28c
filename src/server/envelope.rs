//! Shared response envelope.
//!
//! Every API response carries the same JSON shape:
//! `{success: bool, data?, message?, error?, count?}`. Handlers build
//! responses through these helpers so the shape stays uniform across the
//! public, admin, and upload surfaces.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

/// 200 with `data`.
pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(json!({"success": true, "data": data}))).into_response()
}

/// 200 with `data` and its element `count`.
pub fn ok_list<T: Serialize>(data: Vec<T>) -> Response {
    let count = data.len();
    (
        StatusCode::OK,
        Json(json!({"success": true, "data": data, "count": count})),
    )
        .into_response()
}

/// 201 with `data`.
pub fn created<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(json!({"success": true, "data": data}))).into_response()
}

/// 200 with a `message` and no data (deletes, acknowledgements).
pub fn message(text: &str) -> Response {
    (StatusCode::OK, Json(json!({"success": true, "message": text}))).into_response()
}

/// Failure with an `error` string.
pub fn error(status: StatusCode, error: &str) -> Response {
    (status, Json(json!({"success": false, "error": error}))).into_response()
}

/// Failure with both an `error` code and a human `message`.
pub fn error_with_message(status: StatusCode, error: &str, message: &str) -> Response {
    (
        status,
        Json(json!({"success": false, "error": error, "message": message})),
    )
        .into_response()
}

/// 404 for a missing single-entity lookup.
pub fn not_found(what: &str) -> Response {
    error(StatusCode::NOT_FOUND, &format!("{} not found", what))
}

/// 400 for a rejected write, with the store's message passed through.
pub fn constraint(store_message: &str) -> Response {
    error(StatusCode::BAD_REQUEST, store_message)
}

/// 500 for an unexpected collaborator failure.
pub fn internal(err: &anyhow::Error) -> Response {
    error(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn ok_list_includes_count() {
        let response = ok_list(vec![1, 2, 3]);
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["count"], 3);
        assert_eq!(json["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn not_found_names_the_entity() {
        let response = not_found("Course");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Course not found");
    }

    #[tokio::test]
    async fn error_with_message_carries_both_fields() {
        let response = error_with_message(StatusCode::OK, "needs_setup", "run the migration");
        let json = body_json(response).await;
        assert_eq!(json["error"], "needs_setup");
        assert_eq!(json["message"], "run the migration");
    }
}
