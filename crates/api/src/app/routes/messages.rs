use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use postbox_core::MessageId;
use postbox_infra::SqliteStore;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_messages).post(create_message))
        .route(
            "/:id",
            get(get_message).put(update_message).delete(delete_message),
        )
        .nest("/:id/authors", super::authors::router())
}

pub async fn list_messages(
    Extension(store): Extension<Arc<SqliteStore>>,
    Query(params): Query<dto::ListMessagesParams>,
) -> axum::response::Response {
    match store.list_messages(params.filter.as_deref()).await {
        Ok(messages) => (StatusCode::OK, Json(messages)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_message(
    Extension(store): Extension<Arc<SqliteStore>>,
    Json(body): Json<dto::CreateMessageRequest>,
) -> axum::response::Response {
    match store.create_message(body.into_new_message()).await {
        Ok(message) => (StatusCode::CREATED, Json(message)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_message(
    Extension(store): Extension<Arc<SqliteStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    // A non-numeric segment can never address a record.
    let id: MessageId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::message_not_found(),
    };
    match store.get_message(id).await {
        Ok(Some(message)) => (StatusCode::OK, Json(message)).into_response(),
        Ok(None) => errors::message_not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_message(
    Extension(store): Extension<Arc<SqliteStore>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateMessageRequest>,
) -> axum::response::Response {
    let id: MessageId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::not_found(),
    };
    let mut message = match store.get_message(id).await {
        Ok(Some(m)) => m,
        Ok(None) => return errors::not_found(),
        Err(e) => return errors::store_error_to_response(e),
    };

    body.into_update().apply(&mut message);

    match store.update_message(&message).await {
        Ok(true) => errors::accepted(),
        Ok(false) => errors::not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_message(
    Extension(store): Extension<Arc<SqliteStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: MessageId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::not_found(),
    };
    match store.delete_message(id).await {
        Ok(true) => errors::accepted(),
        Ok(false) => errors::not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}
