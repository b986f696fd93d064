//! # DocVerify API Server
//!
//! REST API for registering and verifying documents.
//!
//! ## Endpoints
//!
//! - `GET /api/verify?doc=&reg=` - Verify a document
//! - `POST /api/verify` - Register (or re-register) a document
//! - `DELETE /api/verify?doc=&reg=` - Remove a registration
//! - `GET /api/verify/list` - List registered documents (also `PUT /api/verify`)
//! - `GET /health` - Health check
//!
//! ## Example
//!
//! ```rust,ignore
//! use docverify_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env();
//! let server = ApiServer::new(config);
//! server.run(([0, 0, 0, 0], 3000)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// API server for DocVerify.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    pub fn new(config: ApiConfig) -> Self {
        Self::with_state(AppState::new(config))
    }

    /// Creates a server around prepared state.
    pub fn with_state(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(RequestBodyLimitLayer::new(self.state.config.max_body_bytes))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!(
            registry = %self.state.config.registry_path.display(),
            "DocVerify API server listening on {}", addr
        );

        axum::serve(listener, self.router()).await
    }
}
