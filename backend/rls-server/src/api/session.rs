use crate::{Access, ApiError, AppState};

use rls_db::SessionConnection;

use axum::{Json, extract::State};
use futures::FutureExt;
use serde::Serialize;

/// Session settings as read back from the database connection
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub tenant_id: Option<String>,
    pub user_id: Option<String>,
    pub verified: bool,
}

/// GET /session - Bind a scoped session and report what the database sees
pub async fn session(
    State(state): State<AppState>,
    Access(projection): Access,
) -> Result<Json<SessionResponse>, ApiError> {
    let response = state
        .scope
        .scoped(projection, |session| {
            async move {
                let keys = session.keys().clone();
                let verified = session
                    .binding()
                    .is_some_and(|binding| binding.verified);

                let connection = session.connection()?;
                let tenant_id = connection.read_setting(keys.tenant()).await?;
                let user_id = connection.read_setting(keys.user()).await?;

                Ok::<_, ApiError>(SessionResponse {
                    tenant_id,
                    user_id,
                    verified,
                })
            }
            .boxed()
        })
        .await?;

    Ok(Json(response))
}
