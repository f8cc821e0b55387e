//! Axum extractors for credential-based authentication

use crate::{ApiError, AppState};

use rls_auth::{AuthError, CredentialSource};

use std::future::Future;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use error_location::ErrorLocation;
use http::header::AUTHORIZATION;

/// Raw credential from the `Authorization` header.
///
/// HTTP requests only consult the header; query and sub-protocol channels
/// are reserved for WebSocket upgrades.
pub struct BearerToken(pub String);

impl FromRequestParts<AppState> for BearerToken {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let authorization = match parts.headers.get(AUTHORIZATION) {
                Some(value) => Some(value.to_str().map_err(|_| AuthError::CredentialMalformed {
                    reason: "authorization header is not valid UTF-8",
                    location: ErrorLocation::from(Location::caller()),
                })?),
                None => None,
            };

            let token = state
                .resolver
                .resolve(&CredentialSource::from_authorization(authorization))?;

            Ok(BearerToken(token))
        }
    }
}
