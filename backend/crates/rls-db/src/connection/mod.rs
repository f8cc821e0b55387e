pub mod session_connection;
pub mod session_factory;
