use crate::{DbError, Result, ScopeState, SessionBinding, SessionConnection, SessionKeys};

use rls_auth::AccessProjection;

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, error, warn};
use uuid::Uuid;

/// One database connection plus the access context bound to it.
///
/// Exclusively owned by a single logical request. The binding metadata lives
/// in a typed field here rather than on the connection, and is cleared before
/// any database-side cleanup is attempted.
///
/// Dropping a session that was bound but never released resets it on a
/// background task (or closes the connection when no runtime is available),
/// so a connection is never handed back to the pool still carrying a tenant.
pub struct ScopedSession<C: SessionConnection + 'static> {
    connection: Option<C>,
    keys: Arc<SessionKeys>,
    state: ScopeState,
    binding: Option<SessionBinding>,
    discard: bool,
}

impl<C: SessionConnection + 'static> ScopedSession<C> {
    pub fn new(connection: C, keys: Arc<SessionKeys>) -> Self {
        Self {
            connection: Some(connection),
            keys,
            state: ScopeState::Unbound,
            binding: None,
            discard: false,
        }
    }

    pub fn state(&self) -> ScopeState {
        self.state
    }

    pub fn binding(&self) -> Option<&SessionBinding> {
        self.binding.as_ref()
    }

    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    /// Access context currently bound to this session
    #[track_caller]
    pub fn access_projection(&self) -> Result<AccessProjection> {
        self.binding
            .map(|binding| binding.projection())
            .ok_or_else(|| DbError::NotBound {
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// The bound connection, for running the request's statements
    #[track_caller]
    pub fn connection(&mut self) -> Result<&mut C> {
        match (self.state, self.connection.as_mut()) {
            (ScopeState::Bound { .. }, Some(connection)) => Ok(connection),
            _ => Err(DbError::NotBound {
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Write the tenant and user settings, optionally reading them back.
    ///
    /// Any failure leaves the session in `Binding` and marks the connection
    /// for discard; the caller must still [`reset`](Self::reset) it.
    pub async fn bind(
        &mut self,
        projection: AccessProjection,
        verify: bool,
    ) -> Result<&SessionBinding> {
        let caller = Location::caller();

        let connection = match (self.state, self.connection.as_mut()) {
            (ScopeState::Unbound, Some(connection)) => connection,
            (state, _) => {
                return Err(DbError::InvalidState {
                    state,
                    location: ErrorLocation::from(caller),
                });
            }
        };

        self.state = ScopeState::Binding;
        debug!(
            "Binding session to tenant {} user {}",
            projection.tenant, projection.user
        );

        if let Err(e) = Self::apply(connection, &self.keys, projection, verify, caller).await {
            if e.is_fatal() {
                error!("Session bind aborted, connection will be discarded: {e}");
            }
            self.discard = true;
            return Err(e);
        }

        self.state = ScopeState::Bound { verified: verify };
        Ok(self.binding.insert(SessionBinding {
            tenant: projection.tenant,
            user: projection.user,
            verified: verify,
        }))
    }

    async fn apply(
        connection: &mut C,
        keys: &SessionKeys,
        projection: AccessProjection,
        verify: bool,
        caller: &'static Location<'static>,
    ) -> Result<()> {
        let bind_failure = |source| DbError::BindFailure {
            source,
            location: ErrorLocation::from(caller),
        };

        connection
            .set_setting(keys.tenant(), &projection.tenant.to_string())
            .await
            .map_err(bind_failure)?;
        connection
            .set_setting(keys.user(), &projection.user.to_string())
            .await
            .map_err(bind_failure)?;

        if verify {
            Self::verify(connection, keys.tenant(), projection.tenant, caller).await?;
            Self::verify(connection, keys.user(), projection.user, caller).await?;
        }

        Ok(())
    }

    /// Read `key` back on the same connection and compare as UUIDs
    async fn verify(
        connection: &mut C,
        key: &str,
        expected: Uuid,
        caller: &'static Location<'static>,
    ) -> Result<()> {
        let actual = connection
            .read_setting(key)
            .await
            .map_err(|source| DbError::BindFailure {
                source,
                location: ErrorLocation::from(caller),
            })?;

        let matches = actual
            .as_deref()
            .filter(|value| !value.is_empty())
            .and_then(|value| Uuid::parse_str(value).ok())
            .is_some_and(|actual| actual == expected);

        if !matches {
            return Err(DbError::ContextMismatch {
                setting: key.to_string(),
                location: ErrorLocation::from(caller),
            });
        }

        Ok(())
    }

    /// Clear the binding and the connection's settings.
    ///
    /// In-memory metadata is cleared first and unconditionally. Failures of the
    /// clearing statements are swallowed; the connection is then closed rather
    /// than reused. Calling this on a released session does nothing.
    pub async fn reset(&mut self) {
        if self.state == ScopeState::Released {
            debug!("Session already released");
            return;
        }

        let was_unbound = self.state == ScopeState::Unbound;
        self.state = ScopeState::Releasing;
        self.binding = None;

        if let Some(connection) = self.connection.as_mut() {
            let cleared = was_unbound || clear_settings(connection, &self.keys).await;
            if !cleared || self.discard {
                connection.discard();
            }
        }

        self.state = ScopeState::Released;
    }

    /// Reset and give the connection back to its factory
    pub async fn release(mut self) {
        self.reset().await;
    }
}

impl<C: SessionConnection + 'static> Drop for ScopedSession<C> {
    fn drop(&mut self) {
        if matches!(self.state, ScopeState::Unbound | ScopeState::Released) {
            return;
        }

        self.binding = None;
        let Some(mut connection) = self.connection.take() else {
            return;
        };

        if self.discard {
            connection.discard();
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                warn!(
                    "Session dropped while {}; resetting in background",
                    self.state
                );
                let keys = Arc::clone(&self.keys);
                handle.spawn(async move {
                    if !clear_settings(&mut connection, &keys).await {
                        connection.discard();
                    }
                });
            }
            Err(_) => {
                warn!(
                    "Session dropped while {} outside a runtime; closing connection",
                    self.state
                );
                connection.discard();
            }
        }

        self.state = ScopeState::Released;
    }
}

/// Issue `RESET` for both settings. Returns whether both succeeded.
async fn clear_settings<C: SessionConnection>(connection: &mut C, keys: &SessionKeys) -> bool {
    let mut cleared = true;

    for key in [keys.user(), keys.tenant()] {
        if let Err(e) = connection.reset_setting(key).await {
            // Closing the connection drops session settings anyway
            debug!("Failed to reset {key}: {e}");
            cleared = false;
        }
    }

    cleared
}
