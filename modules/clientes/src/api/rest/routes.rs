use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::api::rest::{error, handlers};
use crate::domain::service::Service;

/// All customer routes. Delete is POST-only; GET on it is a 405.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route(
            handlers::LIST_PATH,
            get(handlers::list_clientes).post(handlers::create_cliente),
        )
        .route("/adicionar", post(handlers::create_cliente))
        .route("/clientes/{id}/excluir", post(handlers::delete_cliente))
        .route("/deletar/{id}", post(handlers::delete_cliente))
        .fallback(error::not_found_fallback)
        .layer(Extension(service))
}
