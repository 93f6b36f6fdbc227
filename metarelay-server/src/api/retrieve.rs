//! Retrieve API Handler

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Response,
};
use metarelay_core::dto::retrieve::RetrieveRequest;
use uuid::Uuid;

use crate::api::error::ApiResult;
use crate::api::relay_response;
use crate::service::proxy_service;
use crate::state::AppState;

/// POST /api/proxy/retrieve
/// Retrieve metadata and stream the final `checkRetrieveStatus` reply back
///
/// The reply carries the base64 zip; the caller extracts it.
#[tracing::instrument(skip_all, fields(relay_id = %Uuid::new_v4()))]
pub async fn retrieve_metadata(
    State(state): State<AppState>,
    payload: Result<Json<RetrieveRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(req) = payload?;
    let stream = proxy_service::retrieve(&state, req).await?;

    Ok(relay_response(stream))
}
