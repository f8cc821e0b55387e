use crate::IdentityContext;

use serde::Serialize;
use uuid::Uuid;

/// Tenant/user pair bound onto a database session.
///
/// Pure projection of an [`IdentityContext`]; it has no lifecycle of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AccessProjection {
    #[serde(rename = "tenant_id")]
    pub tenant: Uuid,
    #[serde(rename = "user_id")]
    pub user: Uuid,
}

impl AccessProjection {
    pub fn new(tenant: Uuid, user: Uuid) -> Self {
        Self { tenant, user }
    }
}

impl From<&IdentityContext> for AccessProjection {
    fn from(ctx: &IdentityContext) -> Self {
        Self {
            tenant: ctx.tenant,
            user: ctx.subject,
        }
    }
}

impl From<IdentityContext> for AccessProjection {
    fn from(ctx: IdentityContext) -> Self {
        Self::from(&ctx)
    }
}
