// src/serve/error.rs

use crate::advisor::{AdvisorError, AskError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// User-facing error taxonomy. Parse-level anomalies never reach this type —
/// they are swallowed inside the parser/loader; only contract violations cross
/// the API boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested district/file yielded no matching records.
    #[error("{0}")]
    NotFound(String),
    /// Missing or unusable configuration, e.g. the completion credential.
    #[error("{0}")]
    Config(String),
    /// The completion service answered with a non-success status.
    #[error("completion service returned {status}: {body}")]
    Upstream { status: u16, body: String },
    /// The completion service could not be reached at all.
    #[error("{0}")]
    Unreachable(String),
    /// The completion service did not answer in time.
    #[error("{0}")]
    Timeout(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                json!({ "message": message }),
            ),
            ApiError::Config(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": message }),
            ),
            ApiError::Upstream { .. } => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": self.to_string() }),
            ),
            ApiError::Unreachable(message) => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": message }),
            ),
            ApiError::Timeout(message) => (
                StatusCode::GATEWAY_TIMEOUT,
                json!({ "error": message }),
            ),
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": e.to_string() }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<AdvisorError> for ApiError {
    fn from(e: AdvisorError) -> Self {
        match e {
            AdvisorError::MissingCredential => ApiError::Config(e.to_string()),
            AdvisorError::Timeout(_) => ApiError::Timeout(e.to_string()),
            AdvisorError::Upstream { status, body } => ApiError::Upstream { status, body },
            AdvisorError::Transport(_) => ApiError::Unreachable(e.to_string()),
        }
    }
}

impl From<AskError> for ApiError {
    fn from(e: AskError) -> Self {
        match e {
            AskError::Advisor(inner) => inner.into(),
            AskError::Internal(inner) => ApiError::Internal(inner),
        }
    }
}
