//! REST API error types
//!
//! Every failure is rendered as `{"error": {"code", "message"}}`. Messages are
//! fixed strings: neither credential material nor claim values are echoed.

use rls_auth::AuthError;
use rls_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "TOKEN_INVALID")
    pub code: String,
    pub message: String,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Credential missing, malformed or undecodable (401)
    #[error("Unauthorized ({code}): {message} {location}")]
    Unauthorized {
        code: &'static str,
        message: &'static str,
        location: ErrorLocation,
    },

    /// No database session could be obtained (503)
    #[error("Service unavailable: {message} {location}")]
    ServiceUnavailable {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error ({code}): {message} {location}")]
    Internal {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let body = match self {
            ApiError::Unauthorized { code, message, .. } => ApiErrorBody {
                code: code.into(),
                message: message.into(),
            },
            ApiError::ServiceUnavailable { message, .. } => ApiErrorBody {
                code: "SERVICE_UNAVAILABLE".into(),
                message,
            },
            ApiError::Internal { code, message, .. } => ApiErrorBody {
                code: code.into(),
                message,
            },
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        // Reason stays in the server log only
        log::debug!("Rejecting credential: {}", e);

        ApiError::Unauthorized {
            code: e.error_code(),
            message: e.public_message(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        log::error!("Session scope error: {}", e);

        match e {
            DbError::Acquire { .. } => ApiError::ServiceUnavailable {
                message: "Database session unavailable".to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
            other => ApiError::Internal {
                code: other.error_code(),
                message: "Database operation failed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

impl From<sqlx::Error> for ApiError {
    #[track_caller]
    fn from(e: sqlx::Error) -> Self {
        // Don't expose internal database details to clients
        log::error!("Database error: {}", e);

        ApiError::Internal {
            code: "DATABASE_ERROR",
            message: "Database operation failed".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
