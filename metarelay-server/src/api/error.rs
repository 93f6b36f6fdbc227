//! API Error Handling
//!
//! Unified error types and conversion for API responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use metarelay_client::ClientError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// Remote rejected the call; body is forwarded verbatim
    Upstream {
        status: u16,
        body: String,
    },
    BadGateway(String),
    GatewayTimeout(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            ApiError::Upstream { status, body } => {
                tracing::warn!("Upstream rejected request with status {}", status);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(serde_json::json!({
                        "error": format!("Upstream returned status {}", status),
                        "detail": body,
                    })),
                )
                    .into_response()
            }
            ApiError::BadGateway(msg) => {
                tracing::error!("Upstream failure: {}", msg);
                error_response(StatusCode::BAD_GATEWAY, msg)
            }
            ApiError::GatewayTimeout(msg) => {
                tracing::warn!("Relay timed out: {}", msg);
                error_response(StatusCode::GATEWAY_TIMEOUT, msg)
            }
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            ClientError::Upstream { status, body } => ApiError::Upstream { status, body },
            ClientError::ParseError(msg) => {
                ApiError::BadGateway(format!("Unexpected upstream response: {}", msg))
            }
            ClientError::RequestFailed(e) => {
                ApiError::BadGateway(format!("Upstream request failed: {}", e))
            }
            timeout @ ClientError::Timeout { .. } => ApiError::GatewayTimeout(timeout.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
