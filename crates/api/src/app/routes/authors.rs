use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use postbox_core::{AuthorId, Message, MessageId, NewAuthor};
use postbox_infra::SqliteStore;

use crate::app::{dto, errors};

/// Sub-collection nested under `/messages/:id/authors`. Every handler first
/// resolves the owning message; the two stages are not atomic.
pub fn router() -> Router {
    Router::new()
        .route("/", get(list_authors).post(create_author))
        .route(
            "/:aid",
            get(get_author).put(update_author).delete(delete_author),
        )
}

async fn lookup_message(
    store: &SqliteStore,
    raw_id: &str,
) -> Result<Message, axum::response::Response> {
    let id: MessageId = raw_id.parse().map_err(|_| errors::not_found())?;
    match store.get_message(id).await {
        Ok(Some(message)) => Ok(message),
        Ok(None) => Err(errors::not_found()),
        Err(e) => Err(errors::store_error_to_response(e)),
    }
}

pub async fn list_authors(
    Extension(store): Extension<Arc<SqliteStore>>,
    Path(mid): Path<String>,
) -> axum::response::Response {
    let message = match lookup_message(&store, &mid).await {
        Ok(m) => m,
        Err(resp) => return resp,
    };
    match store.list_authors(message.id).await {
        Ok(authors) => (StatusCode::OK, Json(authors)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_author(
    Extension(store): Extension<Arc<SqliteStore>>,
    Path(mid): Path<String>,
    Json(body): Json<dto::CreateAuthorRequest>,
) -> axum::response::Response {
    let message = match lookup_message(&store, &mid).await {
        Ok(m) => m,
        Err(resp) => return resp,
    };

    // The owning reference comes from the looked-up record, not the raw
    // path segment. Validation failures surface as errors, never a no-op.
    let new = match NewAuthor::new(message.id, body.name, body.email) {
        Ok(n) => n,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match store.create_author(new).await {
        Ok(author) => (StatusCode::CREATED, Json(author)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_author(
    Extension(store): Extension<Arc<SqliteStore>>,
    Path((mid, aid)): Path<(String, String)>,
) -> axum::response::Response {
    let message = match lookup_message(&store, &mid).await {
        Ok(m) => m,
        Err(resp) => return resp,
    };
    let aid: AuthorId = match aid.parse() {
        Ok(v) => v,
        Err(_) => return errors::not_found(),
    };
    match store.get_author(message.id, aid).await {
        Ok(Some(author)) => (StatusCode::OK, Json(author)).into_response(),
        Ok(None) => errors::not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_author(
    Extension(store): Extension<Arc<SqliteStore>>,
    Path((mid, aid)): Path<(String, String)>,
    Json(body): Json<dto::UpdateAuthorRequest>,
) -> axum::response::Response {
    let message = match lookup_message(&store, &mid).await {
        Ok(m) => m,
        Err(resp) => return resp,
    };
    let aid: AuthorId = match aid.parse() {
        Ok(v) => v,
        Err(_) => return errors::not_found(),
    };
    let mut author = match store.get_author(message.id, aid).await {
        Ok(Some(a)) => a,
        Ok(None) => return errors::not_found(),
        Err(e) => return errors::store_error_to_response(e),
    };

    // Only name and email are applied; anything else in the body was already
    // dropped by the DTO.
    if let Err(e) = body.into_update().apply(&mut author) {
        return errors::domain_error_to_response(e);
    }

    match store.update_author(&author).await {
        Ok(true) => errors::accepted(),
        Ok(false) => errors::not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_author(
    Extension(store): Extension<Arc<SqliteStore>>,
    Path((mid, aid)): Path<(String, String)>,
) -> axum::response::Response {
    let message = match lookup_message(&store, &mid).await {
        Ok(m) => m,
        Err(resp) => return resp,
    };
    let aid: AuthorId = match aid.parse() {
        Ok(v) => v,
        Err(_) => return errors::not_found(),
    };
    match store.delete_author(message.id, aid).await {
        Ok(true) => errors::accepted(),
        Ok(false) => errors::not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}
