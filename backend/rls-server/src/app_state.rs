use crate::error::Result as ServerErrorResult;

use rls_auth::{ClaimDecoder, ResolverConfig, TokenResolver};
use rls_config::Config;
use rls_db::{SessionKeys, SessionScope};

use std::sync::Arc;

use sqlx::PgPool;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<TokenResolver>,
    pub decoder: ClaimDecoder,
    pub scope: Arc<SessionScope<PgPool>>,
}

impl AppState {
    pub fn new(resolver: TokenResolver, scope: SessionScope<PgPool>) -> Self {
        Self {
            resolver: Arc::new(resolver),
            decoder: ClaimDecoder::new(),
            scope: Arc::new(scope),
        }
    }

    /// Build state from validated configuration around an existing pool
    pub fn from_config(config: &Config, pool: PgPool) -> ServerErrorResult<Self> {
        let resolver = TokenResolver::new(ResolverConfig {
            scheme: config.auth.scheme.clone(),
            query_params: config.auth.query_params.clone(),
            protocol_prefix: config.auth.protocol_prefix.clone(),
        });

        let keys = SessionKeys::new(
            config.database.tenant_setting.as_str(),
            config.database.user_setting.as_str(),
        )?;
        let scope = SessionScope::new(pool, keys).with_verification(config.database.verify_binding);

        Ok(Self::new(resolver, scope))
    }
}
