//! Deploy Status API Handler

use axum::{
    extract::{Path, Query, State, rejection::QueryRejection},
    response::Response,
};
use metarelay_core::dto::status::StatusQuery;
use uuid::Uuid;

use crate::api::error::ApiResult;
use crate::api::relay_response;
use crate::service::proxy_service;
use crate::state::AppState;

/// GET /api/proxy/status/{job_id}
/// Stream the raw `checkDeployStatus` reply back
///
/// Query parameters:
/// - `instanceUrl`, `sessionId`: caller session
/// - `apiVersion` (optional, default 58.0)
/// - `wait` (optional): poll until the deployment finishes before replying
#[tracing::instrument(skip_all, fields(relay_id = %Uuid::new_v4()))]
pub async fn check_deploy_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(query) = query?;
    let stream = proxy_service::deploy_status(&state, job_id, query).await?;

    Ok(relay_response(stream))
}
