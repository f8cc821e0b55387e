use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, Postgres};

/// A single database connection that can carry session-scoped settings.
///
/// Every call on one value runs on the same physical connection, which is
/// what lets a binding be verified by reading it back.
#[async_trait]
pub trait SessionConnection: Send {
    /// Set `key` for the rest of the connection's life (not transaction-local)
    async fn set_setting(&mut self, key: &str, value: &str) -> sqlx::Result<()>;

    /// Current value of `key`, `None` when unset
    async fn read_setting(&mut self, key: &str) -> sqlx::Result<Option<String>>;

    async fn reset_setting(&mut self, key: &str) -> sqlx::Result<()>;

    /// Close the connection instead of returning it for reuse
    fn discard(&mut self) {}
}

#[async_trait]
impl SessionConnection for PgConnection {
    async fn set_setting(&mut self, key: &str, value: &str) -> sqlx::Result<()> {
        sqlx::query("SELECT set_config($1, $2, false)")
            .bind(key)
            .bind(value)
            .execute(&mut *self)
            .await?;

        Ok(())
    }

    async fn read_setting(&mut self, key: &str) -> sqlx::Result<Option<String>> {
        sqlx::query_scalar::<_, Option<String>>("SELECT current_setting($1, true)")
            .bind(key)
            .fetch_one(&mut *self)
            .await
    }

    async fn reset_setting(&mut self, key: &str) -> sqlx::Result<()> {
        // Identifiers cannot be bound; SessionKeys only admits `prefix.name`
        let statement = format!("RESET {key}");
        sqlx::query(&statement).execute(&mut *self).await?;

        Ok(())
    }
}

#[async_trait]
impl SessionConnection for PoolConnection<Postgres> {
    async fn set_setting(&mut self, key: &str, value: &str) -> sqlx::Result<()> {
        (**self).set_setting(key, value).await
    }

    async fn read_setting(&mut self, key: &str) -> sqlx::Result<Option<String>> {
        (**self).read_setting(key).await
    }

    async fn reset_setting(&mut self, key: &str) -> sqlx::Result<()> {
        (**self).reset_setting(key).await
    }

    fn discard(&mut self) {
        self.close_on_drop();
    }
}
