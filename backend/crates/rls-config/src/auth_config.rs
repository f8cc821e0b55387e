use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_AUTH_SCHEME, DEFAULT_PROTOCOL_PREFIX,
    DEFAULT_QUERY_PARAMS,
};

use serde::Deserialize;

/// Where and how inbound credentials are looked for
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Authorization header scheme, matched case-insensitively
    pub scheme: String,
    /// Query parameters consulted in order on WebSocket upgrades
    pub query_params: Vec<String>,
    /// Sub-protocol entry prefix, as in `access_token=<credential>`
    pub protocol_prefix: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            scheme: String::from(DEFAULT_AUTH_SCHEME),
            query_params: DEFAULT_QUERY_PARAMS.iter().map(|p| p.to_string()).collect(),
            protocol_prefix: String::from(DEFAULT_PROTOCOL_PREFIX),
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        Self::validate_token("auth.scheme", &self.scheme)?;
        Self::validate_token("auth.protocol_prefix", &self.protocol_prefix)?;

        if self.query_params.is_empty() {
            return Err(ConfigError::auth("auth.query_params cannot be empty"));
        }
        for param in &self.query_params {
            Self::validate_token("auth.query_params", param)?;
        }

        Ok(())
    }

    fn validate_token(field: &str, value: &str) -> ConfigErrorResult<()> {
        if value.is_empty() || value.chars().any(|c| c.is_whitespace() || c == '=' || c == ',') {
            return Err(ConfigError::auth(format!(
                "{field} must be non-empty without whitespace, '=' or ',', got '{value}'"
            )));
        }

        Ok(())
    }
}
