//! HTTP ingress: the shared middleware stack, `/health`, and the listener.

use anyhow::{Context, Result};
use axum::{middleware::from_fn, routing::get, Router};
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

/// Wrap module routes with `/health` and the middleware stack.
///
/// Order, outermost first:
/// SetRequestId -> PropagateRequestId -> push_req_id_to_extensions -> Trace -> Timeout -> BodyLimit
pub fn build_router(routes: Router, config: &ApiIngressConfig) -> Router {
    let x_request_id = request_id::header();

    // `Router::layer` wraps everything added so far, so layers go innermost first.
    let mut router = routes
        .route("/health", get(web::health_check))
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes));

    if let Some(timeout) = config.timeout() {
        router = router.layer(TimeoutLayer::new(timeout));
    }

    router
        .layer(request_id::create_trace_layer())
        .layer(from_fn(request_id::push_req_id_to_extensions))
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId))
}

/// Bind `config.bind_addr` and serve until `shutdown` resolves.
/// In-flight requests are drained before returning.
pub async fn serve<F>(router: Router, config: &ApiIngressConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    let local = listener.local_addr()?;
    tracing::info!(addr = %local, "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
