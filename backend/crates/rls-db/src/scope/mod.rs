pub mod scope_state;
pub mod scoped_session;
pub mod session_binding;
pub mod session_scope;
