#![allow(dead_code)]

use rls_auth::{ResolverConfig, TokenResolver};
use rls_db::{SessionKeys, SessionScope};
use rls_server::{AppState, build_router};

use std::time::Duration;

use axum_test::TestServer;
use sqlx::postgres::PgPoolOptions;

/// Nothing listens here; session routes fail to acquire a connection
const UNREACHABLE_DATABASE_URL: &str = "postgres://rls@127.0.0.1:1/rls";

pub fn create_test_state() -> AppState {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_millis(500))
        .connect_lazy(UNREACHABLE_DATABASE_URL)
        .expect("Failed to configure lazy pool");

    AppState::new(
        TokenResolver::new(ResolverConfig::default()),
        SessionScope::new(pool, SessionKeys::default()),
    )
}

/// Create a TestServer over a real HTTP transport (needed for WebSockets)
pub fn create_test_server() -> TestServer {
    TestServer::builder()
        .http_transport()
        .build(build_router(create_test_state()))
        .expect("Failed to create test server")
}
