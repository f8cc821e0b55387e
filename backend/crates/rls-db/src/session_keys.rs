use crate::{DbError, Result};

use rls_config::is_valid_setting_name;

use std::panic::Location;

use error_location::ErrorLocation;

/// Setting read by row-level-security policies for the current tenant
pub const DEFAULT_TENANT_SETTING: &str = "app.tenant_id";
/// Setting read by row-level-security policies for the current user
pub const DEFAULT_USER_SETTING: &str = "app.user_id";

/// Names of the two session-scoped settings shared with the schema's RLS
/// policies. These names are a wire contract with the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKeys {
    tenant: String,
    user: String,
}

impl SessionKeys {
    /// Both names must be distinct `prefix.name` identifiers; they are
    /// interpolated into `RESET` statements.
    #[track_caller]
    pub fn new(tenant: impl Into<String>, user: impl Into<String>) -> Result<Self> {
        let tenant = tenant.into();
        let user = user.into();

        for name in [&tenant, &user] {
            if !is_valid_setting_name(name) {
                return Err(DbError::InvalidSettingName {
                    name: name.clone(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        if tenant == user {
            return Err(DbError::InvalidSettingName {
                name: user,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self { tenant, user })
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}

impl Default for SessionKeys {
    fn default() -> Self {
        Self {
            tenant: DEFAULT_TENANT_SETTING.to_string(),
            user: DEFAULT_USER_SETTING.to_string(),
        }
    }
}
