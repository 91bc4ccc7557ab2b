use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::api::rest::views;
use crate::contract::error::ClientesError;
use crate::domain::error::DomainError;

/// Map domain error to an HTML error response.
///
/// Database details are logged here and never reach the page; the page is
/// rendered from the public [`ClientesError`].
pub fn map_domain_error(e: DomainError, instance: &str) -> Response {
    if let DomainError::Database { .. } = &e {
        tracing::error!(error = ?e, instance, "Database error occurred");
    }
    error_response(&ClientesError::from(e))
}

/// Validation errors are normally re-rendered by the create handler with the
/// form; this arm only covers callers that don't do that.
pub fn error_response(e: &ClientesError) -> Response {
    let (status, title, detail) = match e {
        ClientesError::NotFound { id } => (
            StatusCode::NOT_FOUND,
            "Not found",
            format!("Cliente {id} was not found."),
        ),
        ClientesError::Validation { messages } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "Invalid data",
            messages.join(" "),
        ),
        ClientesError::Internal => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error",
            "An internal error occurred. Please try again later.".to_string(),
        ),
    };
    (status, Html(views::error_page(title, &detail))).into_response()
}

/// Unmatched paths get the same HTML error page.
pub async fn not_found_fallback() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(views::error_page("Not found", "This page does not exist.")),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn database_details_stay_out_of_the_page() {
        let resp = map_domain_error(
            DomainError::database("disk I/O error at /var/db"),
            "/clientes",
        );
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = body(resp).await;
        assert!(html.contains("An internal error occurred"));
        assert!(!html.contains("disk I/O"));
    }

    #[tokio::test]
    async fn not_found_and_validation_statuses() {
        let resp = map_domain_error(DomainError::not_found(42), "/deletar/42");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(body(resp).await.contains("Cliente 42 was not found."));

        let resp = error_response(&ClientesError::Validation {
            messages: vec!["name is required.".into()],
        });
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body(resp).await.contains("name is required."));
    }
}
