//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: repository, image store and workflow wiring
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: multipart form decoding and response mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, extract::DefaultBodyLimit, routing::get};
use tower::ServiceBuilder;

use storefront_infra::config::Settings;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(settings: &Settings) -> Router {
    let services = Arc::new(services::build_services(settings));
    build_router(services, settings.max_upload_bytes)
}

/// Router around already-built services (tests inject their own).
pub fn build_router(services: Arc<services::AppServices>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::log_requests))
                .layer(Extension(services))
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}
