use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use tracing::{error, info, warn};

use crate::api::rest::dto::{ClienteForm, ListQuery, Status};
use crate::api::rest::error::map_domain_error;
use crate::api::rest::views;
use crate::domain::error::DomainError;
use crate::domain::service::Service;

pub const LIST_PATH: &str = "/clientes";

fn redirect_with(status: Status) -> Redirect {
    Redirect::to(&format!("{LIST_PATH}?status={}", status.as_str()))
}

/// `GET /` sends the browser to the list.
pub async fn home() -> Redirect {
    Redirect::to(LIST_PATH)
}

/// List records with an empty form.
pub async fn list_clientes(
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<ListQuery>,
    uri: Uri,
) -> Result<Html<String>, Response> {
    info!("Listing clientes");

    let status = Status::parse(query.status.as_deref());
    match svc.list_clientes().await {
        Ok(clientes) => Ok(Html(views::clientes_page(
            &clientes,
            &ClienteForm::default(),
            &[],
            status,
        ))),
        Err(e) => {
            error!("Failed to list clientes: {}", e);
            Err(map_domain_error(e, uri.path()))
        }
    }
}

/// Validate and add; on violations re-render the page with the submitted
/// values and every message (422), otherwise Post/Redirect/Get.
pub async fn create_cliente(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    Form(form): Form<ClienteForm>,
) -> Result<Response, Response> {
    let form = form.trimmed();
    info!(nome = %form.nome, "Creating cliente");

    match svc.create_cliente(form.clone().into()).await {
        Ok(cliente) => {
            info!(cliente_id = cliente.id, "Cliente created");
            Ok(redirect_with(Status::Created).into_response())
        }
        Err(DomainError::Validation(errors)) => {
            warn!(errors = errors.len(), "Cliente rejected by validation");
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            let clientes = svc.list_clientes().await.map_err(|e| {
                error!("Failed to list clientes: {}", e);
                map_domain_error(e, uri.path())
            })?;
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(views::clientes_page(&clientes, &form, &messages, None)),
            )
                .into_response())
        }
        Err(e) => {
            error!("Failed to create cliente: {}", e);
            Err(map_domain_error(e, uri.path()))
        }
    }
}

/// Delete by id; an unknown id is a 404 page and nothing changes.
pub async fn delete_cliente(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<i32>,
    uri: Uri,
) -> Result<Redirect, Response> {
    info!("Deleting cliente: {}", id);

    match svc.delete_cliente(id).await {
        Ok(()) => Ok(redirect_with(Status::Deleted)),
        Err(e) => {
            error!("Failed to delete cliente {}: {}", id, e);
            Err(map_domain_error(e, uri.path()))
        }
    }
}
