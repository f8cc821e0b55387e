use rls_auth::AccessProjection;

use uuid::Uuid;

/// Tenant/user pair believed active on a session's connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionBinding {
    pub tenant: Uuid,
    pub user: Uuid,
    /// Whether the values were read back from the connection after writing
    pub verified: bool,
}

impl SessionBinding {
    pub fn projection(&self) -> AccessProjection {
        AccessProjection::new(self.tenant, self.user)
    }
}
