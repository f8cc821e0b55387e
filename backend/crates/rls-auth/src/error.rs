use error_location::ErrorLocation;
use thiserror::Error;

/// Failures while turning a request into an identity.
///
/// Variants never carry credential material; `reason` is always a static
/// description of what was wrong with the credential's shape.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing credential {location}")]
    CredentialMissing { location: ErrorLocation },

    #[error("Malformed credential: {reason} {location}")]
    CredentialMalformed {
        reason: &'static str,
        location: ErrorLocation,
    },

    #[error("Invalid token: {reason} {location}")]
    TokenInvalid {
        reason: &'static str,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Machine-readable code for client responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CredentialMissing { .. } => "CREDENTIAL_MISSING",
            Self::CredentialMalformed { .. } => "CREDENTIAL_MALFORMED",
            Self::TokenInvalid { .. } => "TOKEN_INVALID",
        }
    }

    /// Message safe to show to a client
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::CredentialMissing { .. } => "Missing authorization credential",
            Self::CredentialMalformed { .. } => "Invalid authorization scheme",
            Self::TokenInvalid { .. } => "Invalid token",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
