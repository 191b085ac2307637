//! Request-scoped middleware.

use axum::{extract::Request, middleware::Next, response::Response};

/// Log every incoming request line before handling it.
pub async fn request_log(req: Request, next: Next) -> Response {
    tracing::info!(method = %req.method(), uri = %req.uri(), "request");
    next.run(req).await
}
