use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

/// Liveness check; never touches the record store.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "ok",
    )
}
