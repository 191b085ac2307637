//! Consistent error and acknowledgement responses.
//!
//! Not-found conditions are answered with their fixed descriptive bodies.
//! Every other failure, validation included, goes through the uniform
//! responder: logged server-side, answered as 500 `{"message":"some error"}`.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use postbox_core::DomainError;
use postbox_infra::StoreError;

pub fn json_message(status: StatusCode, message: &str) -> axum::response::Response {
    (status, axum::Json(json!({ "message": message }))).into_response()
}

/// 404 body for the message item endpoint.
pub fn message_not_found() -> axum::response::Response {
    json_message(StatusCode::NOT_FOUND, "your message is in another castle")
}

pub fn not_found() -> axum::response::Response {
    json_message(StatusCode::NOT_FOUND, "not found")
}

/// 202 acknowledgement for updates and deletes.
pub fn accepted() -> axum::response::Response {
    json_message(StatusCode::ACCEPTED, "accepted")
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "request failed");
    json_message(StatusCode::INTERNAL_SERVER_ERROR, "some error")
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    tracing::error!(error = %err, "request failed");
    json_message(StatusCode::INTERNAL_SERVER_ERROR, "some error")
}
