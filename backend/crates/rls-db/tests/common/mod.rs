#![allow(dead_code)]

use rls_auth::AccessProjection;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

/// Database used by the Postgres tests; they are skipped when unset
pub const TEST_DATABASE_URL_ENV: &str = "RLS_TEST_DATABASE_URL";

/// Pool against the test database, or `None` when no database is configured
pub async fn test_pool(max_connections: u32) -> Option<PgPool> {
    let Ok(url) = std::env::var(TEST_DATABASE_URL_ENV) else {
        eprintln!("{TEST_DATABASE_URL_ENV} not set; skipping Postgres test");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");

    Some(pool)
}

pub fn random_projection() -> AccessProjection {
    AccessProjection::new(Uuid::new_v4(), Uuid::new_v4())
}
