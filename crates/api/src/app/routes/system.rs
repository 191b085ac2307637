use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use postbox_infra::SqliteStore;

use crate::app::errors;

/// Liveness check; no persistence interaction.
pub async fn ping() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "message": "pong" })))
}

/// Provision the schema (create missing tables). Idempotent. Failures are
/// forwarded to the uniform responder, never dropped.
pub async fn create_tables(
    Extension(store): Extension<Arc<SqliteStore>>,
) -> axum::response::Response {
    match store.sync_schema().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "tables created" })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
