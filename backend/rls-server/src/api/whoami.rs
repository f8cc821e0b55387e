use crate::Identity;

use rls_auth::{IdentityContext, Plan};

use axum::Json;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    pub subject: Uuid,
    pub tenant: Uuid,
    pub role: Option<String>,
    pub scopes: Vec<String>,
    pub plan: Option<Plan>,
}

impl From<IdentityContext> for WhoAmIResponse {
    fn from(identity: IdentityContext) -> Self {
        Self {
            subject: identity.subject,
            tenant: identity.tenant,
            role: identity.role,
            scopes: identity.scopes,
            plan: identity.plan,
        }
    }
}

/// GET /whoami - Claims of the presented credential
pub async fn whoami(Identity(identity): Identity) -> Json<WhoAmIResponse> {
    Json(WhoAmIResponse::from(identity))
}
