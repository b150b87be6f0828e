pub mod config;
pub mod dto;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

use axum::{
    Router,
    routing::{get, put},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use handlers::rest;
use service::NoteService;

/// Builds the HTTP surface: the notes API under `/api`, its OpenAPI document
/// and a health check.
pub fn router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/health", get(rest::health_check))
        .route("/api", get(rest::list_notes).post(rest::create_note))
        .route("/api/{id}", put(rest::update_note).delete(rest::delete_note))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()),
        )
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}
