mod api;

use crate::AppState;

use rls_auth::{IdentityContext, ResolverConfig, TokenResolver, encode_unsigned};
use rls_db::{SessionKeys, SessionScope};

use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

pub(crate) const TENANT: Uuid = Uuid::from_u128(0x7e4a_0000_0000_4000_8000_0000_0000_0002);
pub(crate) const USER: Uuid = Uuid::from_u128(0x5a3b_0000_0000_4000_8000_0000_0000_0003);

/// State whose pool never connects; must be built inside a runtime
pub(crate) fn test_state() -> AppState {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://rls@127.0.0.1:1/rls")
        .unwrap();

    AppState::new(
        TokenResolver::new(ResolverConfig::default()),
        SessionScope::new(pool, SessionKeys::default()),
    )
}

/// Bare unsigned credential for TENANT/USER
pub(crate) fn credential() -> String {
    encode_unsigned(&IdentityContext::new(USER, TENANT))
        .trim_start_matches("Bearer ")
        .to_string()
}
