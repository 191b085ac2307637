//! HTTP application wiring (axum router + store injection).
//!
//! Folder layout:
//! - `routes/`: HTTP routes + handlers (one file per resource area)
//! - `dto.rs`: request DTOs and their mapping into domain types
//! - `errors.rs`: consistent error responses

use std::path::Path;
use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;

use postbox_infra::SqliteStore;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests). The store handle is injected here; paths matching no
/// route fall back to the static directory.
pub fn build_app(store: Arc<SqliteStore>, static_dir: &Path) -> Router {
    Router::new()
        .merge(routes::router())
        .fallback_service(ServeDir::new(static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_log))
                .layer(Extension(store)),
        )
}
