mod auth_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod server_config;

#[cfg(test)]
mod tests;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::{DatabaseConfig, is_valid_setting_name};
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;

const CONFIG_DIR_ENV: &str = "RLS_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".rls";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/rls";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const MIN_MAX_CONNECTIONS: u32 = 1;
const MAX_MAX_CONNECTIONS: u32 = 1000;
const DEFAULT_VERIFY_BINDING: bool = true;
const DEFAULT_TENANT_SETTING: &str = "app.tenant_id";
const DEFAULT_USER_SETTING: &str = "app.user_id";

const DEFAULT_AUTH_SCHEME: &str = "bearer";
const DEFAULT_QUERY_PARAMS: [&str; 2] = ["access_token", "token"];
const DEFAULT_PROTOCOL_PREFIX: &str = "access_token";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
