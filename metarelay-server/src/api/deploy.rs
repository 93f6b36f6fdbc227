//! Deploy API Handler

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use metarelay_core::dto::deploy::{DeployRequest, DeployResponse};
use uuid::Uuid;

use crate::api::error::ApiResult;
use crate::service::proxy_service;
use crate::state::AppState;

/// POST /api/proxy/deploy
/// Forward a base64 zip to `deploy()` and return the job id
#[tracing::instrument(skip_all, fields(relay_id = %Uuid::new_v4()))]
pub async fn deploy_metadata(
    State(state): State<AppState>,
    payload: Result<Json<DeployRequest>, JsonRejection>,
) -> ApiResult<Json<DeployResponse>> {
    let Json(req) = payload?;
    let response = proxy_service::deploy(&state, req).await?;

    Ok(Json(response))
}
