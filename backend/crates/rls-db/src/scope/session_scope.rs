use crate::{DbError, Result, ScopedSession, SessionFactory, SessionKeys};

use rls_auth::AccessProjection;

use std::panic::{AssertUnwindSafe, Location};
use std::sync::Arc;

use error_location::ErrorLocation;
use futures::FutureExt;
use futures::future::BoxFuture;
use log::debug;

/// Produces sessions bound to an access context.
///
/// Constructed once at startup around a [`SessionFactory`] (a `PgPool` in
/// production) and shared by every request.
pub struct SessionScope<F: SessionFactory> {
    factory: F,
    keys: Arc<SessionKeys>,
    verify: bool,
}

impl<F: SessionFactory> SessionScope<F> {
    /// New scope that verifies every binding by reading it back
    pub fn new(factory: F, keys: SessionKeys) -> Self {
        Self {
            factory,
            keys: Arc::new(keys),
            verify: true,
        }
    }

    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Acquire a session and bind it, leaving release to the caller.
    ///
    /// Prefer [`scoped`](Self::scoped). A session obtained here that is dropped
    /// without [`ScopedSession::release`] is reset in the background.
    pub async fn acquire(
        &self,
        projection: AccessProjection,
    ) -> Result<ScopedSession<F::Connection>> {
        let mut session = self.open().await?;

        if let Err(e) = session.bind(projection, self.verify).await {
            session.reset().await;
            return Err(e);
        }

        Ok(session)
    }

    /// Run `work` against a session bound to `projection`.
    ///
    /// The session is reset exactly once whether binding fails, `work` returns
    /// an error, or `work` panics (the panic is resumed after the reset). If the
    /// returned future is dropped mid-way, the session's drop guard performs
    /// the reset instead.
    pub async fn scoped<T, E, W>(&self, projection: AccessProjection, work: W) -> std::result::Result<T, E>
    where
        W: for<'s> FnOnce(&'s mut ScopedSession<F::Connection>) -> BoxFuture<'s, std::result::Result<T, E>>,
        E: From<DbError>,
    {
        let mut session = self.open().await?;

        let outcome = match session.bind(projection, self.verify).await {
            Ok(_) => AssertUnwindSafe(work(&mut session)).catch_unwind().await,
            Err(e) => Ok(Err(E::from(e))),
        };

        session.reset().await;
        debug!("Scoped session released");

        match outcome {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    async fn open(&self) -> Result<ScopedSession<F::Connection>> {
        let connection = self
            .factory
            .acquire()
            .await
            .map_err(|source| DbError::Acquire {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(ScopedSession::new(connection, Arc::clone(&self.keys)))
    }
}
