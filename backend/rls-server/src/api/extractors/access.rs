use crate::{ApiError, AppState, Identity};

use rls_auth::AccessProjection;

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Tenant/user pair of the authenticated caller
pub struct Access(pub AccessProjection);

impl FromRequestParts<AppState> for Access {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let Identity(identity) = Identity::from_request_parts(parts, state).await?;
            Ok(Access(identity.project()))
        }
    }
}
