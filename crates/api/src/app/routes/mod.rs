use axum::{routing::get, Router};

pub mod authors;
pub mod messages;
pub mod system;

/// Router for all endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/ping", get(system::ping))
        .route("/create", get(system::create_tables))
        .nest("/messages", messages::router())
}
