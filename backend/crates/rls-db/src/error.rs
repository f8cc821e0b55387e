use crate::ScopeState;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// Read-back of a session setting disagreed with what was just written.
    /// Treated as a possible tenant-isolation breach.
    #[error("Session context mismatch on '{setting}' {location}")]
    ContextMismatch {
        setting: String,
        location: ErrorLocation,
    },

    #[error("Failed to bind session context: {source} {location}")]
    BindFailure {
        #[source]
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Failed to acquire database session: {source} {location}")]
    Acquire {
        #[source]
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Invalid session scope transition from {state} {location}")]
    InvalidState {
        state: ScopeState,
        location: ErrorLocation,
    },

    #[error("No access context bound to session {location}")]
    NotBound { location: ErrorLocation },

    #[error("Invalid session setting name '{name}' {location}")]
    InvalidSettingName {
        name: String,
        location: ErrorLocation,
    },

    #[error("Invalid connection string: {message} {location}")]
    InvalidDsn {
        message: String,
        location: ErrorLocation,
    },

    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },
}

impl DbError {
    /// Fatal errors abort the request and the connection must not be reused.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ContextMismatch { .. } | Self::BindFailure { .. })
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ContextMismatch { .. } => "CONTEXT_MISMATCH",
            Self::BindFailure { .. } => "BIND_FAILURE",
            Self::Acquire { .. } => "SESSION_UNAVAILABLE",
            Self::InvalidState { .. } => "INVALID_SCOPE_STATE",
            Self::NotBound { .. } => "NOT_BOUND",
            Self::InvalidSettingName { .. } => "INVALID_SETTING_NAME",
            Self::InvalidDsn { .. } => "INVALID_DSN",
            Self::Sqlx { .. } => "DATABASE_ERROR",
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
