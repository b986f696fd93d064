//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info};

use docverify_core::constants::REMOVE_NOT_FOUND_MESSAGE;
use docverify_core::types::DocumentKey;
use docverify_service::{RegisterRequest, Removal, Verification};

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

const MISSING_PARAMS: &str = "Missing required parameters: reg and doc";

fn require_key(query: &DocumentQuery) -> Result<DocumentKey> {
    query.key().ok_or_else(|| ApiError::bad_request(MISSING_PARAMS))
}

/// GET /api/verify?doc=&reg=
pub async fn verify_document(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DocumentQuery>,
) -> Result<Response> {
    let key = require_key(&query)?;

    let verification = state
        .service
        .verify(&key.document_type, &key.registration_number)
        .await?;

    let response = match verification {
        Verification::Verified(document) => {
            debug!(%key, "Document verified");
            Json(VerifiedResponse::from(document)).into_response()
        }
        Verification::NotFound(key) => {
            info!(%key, "Verification failed: not registered");
            (StatusCode::NOT_FOUND, Json(NotVerifiedResponse::from(key))).into_response()
        }
    };

    Ok(response)
}

/// POST /api/verify
pub async fn register_document(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>> {
    let Json(request) = body?;

    let _guard = state.write_lock.lock().await;
    let registration = state.service.register(request).await?;

    Ok(Json(RegisterResponse::from(registration)))
}

/// DELETE /api/verify?doc=&reg=
pub async fn remove_document(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DocumentQuery>,
) -> Result<Json<RemoveResponse>> {
    let key = require_key(&query)?;

    let _guard = state.write_lock.lock().await;
    match state
        .service
        .remove(&key.document_type, &key.registration_number)
        .await?
    {
        Removal::Removed => Ok(Json(RemoveResponse::removed())),
        Removal::NotFound => Err(ApiError::not_found(REMOVE_NOT_FOUND_MESSAGE)),
    }
}

/// GET /api/verify/list (also PUT /api/verify)
pub async fn list_documents(State(state): State<Arc<AppState>>) -> Result<Json<ListResponse>> {
    let files = state
        .service
        .list()
        .await?
        .into_iter()
        .map(FileEntry::from)
        .collect();

    Ok(Json(ListResponse { files }))
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (status, documents) = match state.service.count().await {
        Ok(count) => ("ok", Some(count)),
        Err(_) => ("degraded", None),
    };

    Json(HealthResponse {
        status: status.into(),
        version: env!("CARGO_PKG_VERSION").into(),
        documents,
    })
}
