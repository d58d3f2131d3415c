//! HTTP surface: router, handlers, and error payloads.

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::Orchestrator;

pub use error::ApiError;
pub use routes::GenerateResponse;

/// Shared application state.
///
/// The orchestrator is stateless per request, so one instance is shared by
/// every connection.
#[derive(Clone)]
pub struct AppState {
    /// The request orchestrator.
    pub orchestrator: Arc<Orchestrator>,
}

/// Build the service router.
///
/// CORS is permissive because the service fronts a browser UI served from a
/// different origin.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(routes::generate))
        .route("/health", get(routes::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
