// SPDX-License-Identifier: PMPL-1.0-or-later
//! API error types and response formatting

use crate::db::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chirpy_common::ChirpRejection;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Errors surfaced to HTTP callers.
///
/// Every variant renders a fixed message; store errors are logged here and
/// never leave the process.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed chirp payload")]
    Malformed,

    #[error("chirp exceeds length limit")]
    TooLong,

    #[error("invalid request payload")]
    InvalidRequest,

    #[error("operation only allowed on the dev platform")]
    Forbidden,

    #[error("failed to create user: {0}")]
    CreateUserFailed(#[source] StoreError),

    #[error("failed to delete users: {0}")]
    ResetFailed(#[source] StoreError),
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    /// Status code and public message for this error.
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Malformed => (StatusCode::BAD_REQUEST, "Something went wrong"),
            Self::TooLong => (StatusCode::BAD_REQUEST, "Chirp is too long"),
            Self::InvalidRequest => (StatusCode::BAD_REQUEST, "Invalid request"),
            Self::Forbidden => (StatusCode::FORBIDDEN, "Forbidden"),
            Self::CreateUserFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create user")
            }
            Self::ResetFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete users"),
        }
    }
}

impl From<ChirpRejection> for ApiError {
    fn from(rejection: ChirpRejection) -> Self {
        match rejection {
            ChirpRejection::TooLong { .. } => Self::TooLong,
            ChirpRejection::Malformed => Self::Malformed,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::CreateUserFailed(err) | Self::ResetFailed(err) = &self {
            error!(error = %err, "store operation failed");
        }

        let (status, message) = self.status_and_message();
        let body = ErrorResponse {
            error: message.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
