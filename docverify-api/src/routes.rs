//! API route configuration.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Registry and verification
        .route(
            "/api/verify",
            get(handlers::verify_document)
                .post(handlers::register_document)
                .delete(handlers::remove_document)
                .put(handlers::list_documents),
        )
        .route("/api/verify/list", get(handlers::list_documents))

        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
