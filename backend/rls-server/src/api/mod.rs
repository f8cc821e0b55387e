pub mod error;
pub mod extractors;
pub mod session;
pub mod token;
pub mod whoami;
