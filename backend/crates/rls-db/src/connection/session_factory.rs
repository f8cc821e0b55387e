use crate::SessionConnection;

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};

/// Hands out connections, one exclusive owner at a time
#[async_trait]
pub trait SessionFactory: Send + Sync {
    type Connection: SessionConnection + 'static;

    async fn acquire(&self) -> sqlx::Result<Self::Connection>;
}

#[async_trait]
impl SessionFactory for PgPool {
    type Connection = PoolConnection<Postgres>;

    async fn acquire(&self) -> sqlx::Result<Self::Connection> {
        sqlx::Pool::acquire(self).await
    }
}
