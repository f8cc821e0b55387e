use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    DatabaseConfig, LoggingConfig, ServerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for RLS_CONFIG_DIR env var, else use ./.rls/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply RLS_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: RLS_CONFIG_DIR env var > ./.rls/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;

        if let Some(file) = &self.logging.file
            && (file.trim().is_empty() || file.contains(".."))
        {
            return Err(ConfigError::logging(
                "logging.file must be a non-empty name without '..'",
            ));
        }

        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs the database password).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}", self.bind_addr());
        info!(
            "  database: {} (max {} connections, verify binding: {})",
            self.database.redacted_url(),
            self.database.max_connections,
            self.database.verify_binding
        );
        info!(
            "  session settings: tenant={}, user={}",
            self.database.tenant_setting, self.database.user_setting
        );
        info!(
            "  auth: scheme={}, query=[{}], protocol prefix={}",
            self.auth.scheme,
            self.auth.query_params.join(", "),
            self.auth.protocol_prefix
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("RLS_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("RLS_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("RLS_DATABASE_URL", &mut self.database.url);
        Self::apply_env_parse(
            "RLS_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );
        Self::apply_env_bool(
            "RLS_DATABASE_VERIFY_BINDING",
            &mut self.database.verify_binding,
        );
        Self::apply_env_string(
            "RLS_DATABASE_TENANT_SETTING",
            &mut self.database.tenant_setting,
        );
        Self::apply_env_string("RLS_DATABASE_USER_SETTING", &mut self.database.user_setting);

        // Auth
        Self::apply_env_string("RLS_AUTH_SCHEME", &mut self.auth.scheme);
        Self::apply_env_list("RLS_AUTH_QUERY_PARAMS", &mut self.auth.query_params);
        Self::apply_env_string("RLS_AUTH_PROTOCOL_PREFIX", &mut self.auth.protocol_prefix);

        // Logging
        Self::apply_env_parse("RLS_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_string("RLS_LOG_DIR", &mut self.logging.dir);
        Self::apply_env_option_string("RLS_LOG_FILE", &mut self.logging.file);
        Self::apply_env_bool("RLS_LOG_COLORED", &mut self.logging.colored);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }

    /// Helper: Apply environment variable override for comma-separated lists
    fn apply_env_list(var_name: &str, target: &mut Vec<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect();
        }
    }
}
