//! Error types and response handling for the HTTP service.
//!
//! Every failure is rendered as `{"error": "<message>"}` with the status
//! code of its class.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DatabaseError;
use crate::domain::ValidationError;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing or invalid Authorization header")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body or query string could not be decoded.
    #[error("{0}")]
    BadRequest(String),

    #[error("Email already exists")]
    EmailConflict,

    #[error("Referral not found")]
    ReferralNotFound,

    #[error("Not found")]
    RouteNotFound,

    /// Storage failure. Only `message` reaches the client.
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: DatabaseError,
    },

    /// The blocking task running a storage call panicked or was cancelled.
    #[error("{message}")]
    Worker {
        message: &'static str,
        #[source]
        source: tokio::task::JoinError,
    },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingToken | ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::EmailConflict => StatusCode::CONFLICT,
            ApiError::ReferralNotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } | ApiError::Worker { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Map a storage error, keeping the unique-email violation distinct.
    /// `message` is the per-route text shown for any other failure.
    pub fn storage(message: &'static str) -> impl FnOnce(DatabaseError) -> ApiError {
        move |err| match err {
            DatabaseError::EmailConflict => ApiError::EmailConflict,
            source => ApiError::Internal { message, source },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal { message, source } => {
                tracing::error!(error = %source, "{message}");
            }
            ApiError::Worker { message, source } => {
                tracing::error!(error = %source, "{message}");
            }
            _ => {}
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
