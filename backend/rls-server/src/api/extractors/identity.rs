use crate::{ApiError, AppState, BearerToken};

use rls_auth::IdentityContext;

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Decoded claims of the request's bearer credential
pub struct Identity(pub IdentityContext);

impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;
            let identity = state.decoder.decode(&token)?;
            log::debug!(
                "Authenticated user {} in tenant {}",
                identity.subject,
                identity.tenant
            );

            Ok(Identity(identity))
        }
    }
}
