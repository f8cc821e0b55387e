pub mod connection;
pub mod error;
pub mod scope;
pub mod session_keys;
pub mod tenancy;

pub use connection::session_connection::SessionConnection;
pub use connection::session_factory::SessionFactory;
pub use error::{DbError, Result};
pub use scope::scope_state::ScopeState;
pub use scope::scoped_session::ScopedSession;
pub use scope::session_binding::SessionBinding;
pub use scope::session_scope::SessionScope;
pub use session_keys::{DEFAULT_TENANT_SETTING, DEFAULT_USER_SETTING, SessionKeys};
pub use tenancy::dsn_with_tenant;

#[cfg(test)]
mod tests;
