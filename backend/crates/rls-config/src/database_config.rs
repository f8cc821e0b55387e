use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS,
    DEFAULT_TENANT_SETTING, DEFAULT_USER_SETTING, DEFAULT_VERIFY_BINDING, MAX_MAX_CONNECTIONS,
    MIN_MAX_CONNECTIONS,
};

use serde::Deserialize;
use url::Url;

const REDACTED_PASSWORD: &str = "****";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Postgres connection URI
    pub url: String,
    pub max_connections: u32,
    /// Read session settings back after binding them
    pub verify_binding: bool,
    /// Setting read by RLS policies for the tenant
    pub tenant_setting: String,
    /// Setting read by RLS policies for the user
    pub user_setting: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_DATABASE_URL),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            verify_binding: DEFAULT_VERIFY_BINDING,
            tenant_setting: String::from(DEFAULT_TENANT_SETTING),
            user_setting: String::from(DEFAULT_USER_SETTING),
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let url = Url::parse(&self.url)
            .map_err(|e| ConfigError::database(format!("database.url is invalid: {e}")))?;
        if !matches!(url.scheme(), "postgres" | "postgresql") {
            return Err(ConfigError::database(format!(
                "database.url must use postgres:// or postgresql://, got {}://",
                url.scheme()
            )));
        }

        if self.max_connections < MIN_MAX_CONNECTIONS || self.max_connections > MAX_MAX_CONNECTIONS
        {
            return Err(ConfigError::database(format!(
                "database.max_connections must be {}-{}, got {}",
                MIN_MAX_CONNECTIONS, MAX_MAX_CONNECTIONS, self.max_connections
            )));
        }

        for (field, name) in [
            ("tenant_setting", &self.tenant_setting),
            ("user_setting", &self.user_setting),
        ] {
            if !is_valid_setting_name(name) {
                return Err(ConfigError::database(format!(
                    "database.{field} must look like 'prefix.name', got '{name}'"
                )));
            }
        }

        if self.tenant_setting == self.user_setting {
            return Err(ConfigError::database(
                "database.tenant_setting and database.user_setting must differ",
            ));
        }

        Ok(())
    }

    /// Connection URI with any password masked, for logging
    pub fn redacted_url(&self) -> String {
        match Url::parse(&self.url) {
            Ok(mut url) => {
                if url.password().is_some() {
                    // Only fails for URLs that cannot carry credentials
                    let _ = url.set_password(Some(REDACTED_PASSWORD));
                }
                url.to_string()
            }
            Err(_) => String::from("<invalid url>"),
        }
    }
}

/// Whether `name` is a `prefix.name` pair of plain identifiers.
///
/// Setting names are interpolated into `RESET` statements, so anything else
/// is rejected wherever names enter the system.
pub fn is_valid_setting_name(name: &str) -> bool {
    let Some((prefix, suffix)) = name.split_once('.') else {
        return false;
    };

    [prefix, suffix].iter().all(|part| {
        let mut chars = part.chars();
        chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}
