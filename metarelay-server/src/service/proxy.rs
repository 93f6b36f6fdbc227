//! Proxy Service
//!
//! One function per browser-facing operation. Each builds a client scoped
//! to the caller's session and drops it when the relay finishes.

use metarelay_client::{ClientError, RelayStream, Result};
use metarelay_core::domain::job::JobHandle;
use metarelay_core::dto::deploy::{DeployRequest, DeployResponse};
use metarelay_core::dto::retrieve::RetrieveRequest;
use metarelay_core::dto::status::StatusQuery;

use crate::state::AppState;

/// Retrieve metadata, wait for the job, and return the final reply as a stream
pub async fn retrieve(state: &AppState, req: RetrieveRequest) -> Result<RelayStream> {
    if req.unpackaged_xml.trim().is_empty() {
        return Err(ClientError::InvalidRequest(
            "unpackagedXml cannot be empty".to_string(),
        ));
    }

    let client = state.metadata_client(req.session())?;

    tracing::info!("Retrieving metadata from {}", req.instance_url);

    client.retrieve(&req.unpackaged_xml).await
}

/// Start a deployment and return its job id
pub async fn deploy(state: &AppState, req: DeployRequest) -> Result<DeployResponse> {
    if req.zip_base64.is_empty() {
        return Err(ClientError::InvalidRequest(
            "zipBase64 cannot be empty".to_string(),
        ));
    }

    let client = state.metadata_client(req.session())?;

    tracing::info!(
        "Deploying {} bytes of archive to {} (check only: {}, tests: {})",
        req.zip_base64.len(),
        req.instance_url,
        req.check_only,
        req.test_level
    );

    let job_id = client.deploy(&req.zip_base64, &req.options()).await?;

    tracing::info!("Deployment queued as job {}", job_id);

    Ok(DeployResponse { job_id })
}

/// Check a deployment, optionally waiting until it finishes
pub async fn deploy_status(
    state: &AppState,
    job_id: String,
    query: StatusQuery,
) -> Result<RelayStream> {
    if job_id.trim().is_empty() {
        return Err(ClientError::InvalidRequest(
            "job id cannot be empty".to_string(),
        ));
    }

    let client = state.metadata_client(query.session())?;
    let handle = JobHandle::new(job_id);

    if query.wait {
        tracing::debug!("Waiting for deployment {}", handle);
        client.await_deploy(&handle).await
    } else {
        tracing::debug!("Checking deployment {}", handle);
        client.deploy_status(&handle).await
    }
}
